// File: crates/crash-chart-core/src/axis.rs
// Summary: Bottom (categorical) and left (numeric) axes plus axis labels and chart title.

use crate::geometry::PlotArea;
use crate::scale::{format_tick, BandScale, LinearScale};
use crate::scene::{Anchor, Element, Transform};
use crate::theme::Theme;

const TICK_SIZE: f32 = 6.0;
const TICK_PADDING: f32 = 3.0;
/// Rough advance width of one glyph as a fraction of font size.
const GLYPH_ASPECT: f32 = 0.6;
const LEFT_TICK_COUNT: usize = 10;

/// Axis captions drawn outside the plot.
#[derive(Clone, Debug)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self { x: "Operator".to_string(), y: "Count".to_string() }
    }
}

/// Estimated rendered width of `text` at `size`.
pub fn estimate_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_ASPECT
}

/// Whether category labels need rotating to stay legible inside their band step.
pub fn needs_rotation(x: &BandScale, font_size: f32) -> bool {
    x.domain().iter().any(|k| estimate_width(k, font_size) > x.step())
}

/// Bottom axis at `height`, one tick per band centered in the band.
pub fn bottom(x: &BandScale, height: f32, width: f32, theme: &Theme, font_size: f32) -> Element {
    let rotate = needs_rotation(x, font_size);
    let mut children = vec![Element::line(0.0, 0.0, width, 0.0).class("domain").stroke(theme.axis_line)];

    for key in x.domain() {
        let Some(px) = x.position(key) else { continue };
        let mut label = Element::text(0.0, TICK_SIZE + TICK_PADDING, font_size, key.clone()).fill(theme.tick);
        label = if rotate {
            label.anchored(Anchor::End, 0.71 * font_size).transform(Transform::rotate(-45.0))
        } else {
            label.anchored(Anchor::Middle, 0.71 * font_size)
        };
        let tick = Element::group(vec![
            Element::line(0.0, 0.0, 0.0, TICK_SIZE).stroke(theme.axis_line),
            label,
        ])
        .class("tick")
        .transform(Transform::translate(px + x.bandwidth() * 0.5, 0.0));
        children.push(tick);
    }

    Element::group(children)
        .class("x-axis")
        .transform(Transform::translate(0.0, height))
}

/// Left axis with round ticks from the value scale.
pub fn left(y: &LinearScale, theme: &Theme, font_size: f32) -> Element {
    let mut children = vec![Element::line(0.0, y.top_px, 0.0, y.bottom_px).class("domain").stroke(theme.axis_line)];

    for v in y.ticks(LEFT_TICK_COUNT) {
        let tick = Element::group(vec![
            Element::line(-TICK_SIZE, 0.0, 0.0, 0.0).stroke(theme.axis_line),
            Element::text(-(TICK_SIZE + TICK_PADDING), 0.0, font_size, format_tick(v))
                .anchored(Anchor::End, 0.32 * font_size)
                .fill(theme.tick),
        ])
        .class("tick")
        .transform(Transform::translate(0.0, y.to_px(v)));
        children.push(tick);
    }

    Element::group(children).class("y-axis")
}

/// Axis captions: X centered under the plot, Y rotated along the left margin.
pub fn captions(area: &PlotArea, labels: &AxisLabels, theme: &Theme, font_size: f32) -> Vec<Element> {
    let size = font_size * 1.2;
    vec![
        Element::text(area.width * 0.5, area.height + area.insets.bottom as f32 - 10.0, size, labels.x.clone())
            .anchored(Anchor::Middle, 0.0)
            .class("x-label")
            .fill(theme.axis_label),
        Element::text(-area.height * 0.5, -(area.insets.left as f32) + 20.0, size, labels.y.clone())
            .anchored(Anchor::Middle, 0.0)
            .class("y-label")
            .transform(Transform::rotate(-90.0))
            .fill(theme.axis_label),
    ]
}

/// Title centered in the top margin.
pub fn title(area: &PlotArea, text: impl Into<String>, theme: &Theme, font_size: f32) -> Element {
    Element::text(area.width * 0.5, -(area.insets.top as f32) * 0.5, font_size * 1.6, text)
        .anchored(Anchor::Middle, 0.0)
        .class("chart-title")
        .fill(theme.title)
}
