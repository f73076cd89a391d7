// File: crates/crash-chart-core/src/text.rs
// Summary: Skia textlayout shaping for the raster backend (anchored labels, bold headings).

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

use crate::scene::Anchor;

const FAMILIES: &[&str] = &["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"];
/// Labels at or above this size (chart title) are set bold.
const HEADING_SIZE: f32 = 14.0;

/// One positioned label, as read off a text element.
#[derive(Clone, Copy, Debug)]
pub struct Label<'a> {
    pub text: &'a str,
    pub x: f32,
    /// Baseline.
    pub y: f32,
    pub size: f32,
    pub color: skia::Color,
    pub anchor: Anchor,
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(FAMILIES);
        if size >= HEADING_SIZE {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    fn shape(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::style(size, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Paint `label`, shifting it left by its shaped width per the anchor.
    pub fn draw(&self, canvas: &skia::Canvas, label: &Label<'_>) {
        let mut p = self.shape(label.text, label.size, label.color);
        let width = p.longest_line();
        let left = match label.anchor {
            Anchor::Start => label.x,
            Anchor::Middle => label.x - width * 0.5,
            Anchor::End => label.x - width,
        };
        // Paragraphs paint from their top-left corner; lift by the ascent.
        p.paint(canvas, (left, label.y - label.size * 0.8));
    }
}
