// File: crates/crash-chart-core/src/raster.rs
// Summary: Headless PNG rendering of a surface using Skia CPU raster surfaces.

use std::path::Path;

use anyhow::Result;
use skia_safe as skia;

use crate::geometry::polar;
use crate::scene::{Element, PathCmd, Shape, Surface};
use crate::text::{Label, TextShaper};
use crate::theme::Theme;

/// Max angular step when flattening arcs into line segments (radians).
const ARC_STEP: f64 = std::f64::consts::PI / 64.0;

/// Rasterize the surface and encode it as PNG.
pub fn render_png_bytes(surface: &Surface, theme: &Theme) -> Result<Vec<u8>> {
    let w = surface.area.canvas_width().round() as i32;
    let h = surface.area.canvas_height().round() as i32;
    let mut raster = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let canvas = raster.canvas();
    canvas.clear(theme.background);

    let shaper = TextShaper::new();
    if let Some(root) = surface.root() {
        draw_element(canvas, root, &shaper);
    }

    let image = raster.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render the surface to a PNG at `output_png_path`.
pub fn render_to_png(surface: &Surface, theme: &Theme, output_png_path: impl AsRef<Path>) -> Result<()> {
    let bytes = render_png_bytes(surface, theme)?;
    if let Some(parent) = output_png_path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_png_path, bytes)?;
    Ok(())
}

// ---- helpers ----------------------------------------------------------------

fn draw_element(canvas: &skia::Canvas, el: &Element, shaper: &TextShaper) {
    canvas.save();
    let (tx, ty) = el.transform.translate;
    canvas.translate((tx, ty));
    if el.transform.rotate != 0.0 {
        canvas.rotate(el.transform.rotate, None);
    }

    match &el.shape {
        Shape::Group(children) => {
            for c in children {
                draw_element(canvas, c, shaper);
            }
        }
        Shape::Rect { x, y, width, height } => {
            let rect = skia::Rect::from_xywh(*x, *y, width.max(0.0), height.max(0.0));
            canvas.draw_rect(rect, &fill_paint(el.fill.unwrap_or(skia::Color::BLACK)));
            if let Some(stroke) = el.stroke {
                canvas.draw_rect(rect, &stroke_paint(stroke));
            }
        }
        Shape::Line { x1, y1, x2, y2 } => {
            let paint = stroke_paint(el.stroke.unwrap_or(skia::Color::BLACK));
            canvas.draw_line((*x1, *y1), (*x2, *y2), &paint);
        }
        Shape::Path(cmds) => {
            let path = to_skia_path(cmds);
            canvas.draw_path(&path, &fill_paint(el.fill.unwrap_or(skia::Color::BLACK)));
            if let Some(stroke) = el.stroke {
                canvas.draw_path(&path, &stroke_paint(stroke));
            }
        }
        Shape::Text { x, y, dy, anchor, size, content } => {
            let label = Label {
                text: content,
                x: *x,
                y: *y + *dy,
                size: *size,
                color: el.fill.unwrap_or(skia::Color::BLACK),
                anchor: *anchor,
            };
            shaper.draw(canvas, &label);
        }
    }

    canvas.restore();
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

fn stroke_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(1.0);
    paint.set_color(color);
    paint
}

/// Arcs are flattened into short line segments around the local origin.
fn to_skia_path(cmds: &[PathCmd]) -> skia::Path {
    let mut path = skia::Path::new();
    for cmd in cmds {
        match *cmd {
            PathCmd::MoveTo(x, y) => { path.move_to((x, y)); }
            PathCmd::LineTo(x, y) => { path.line_to((x, y)); }
            PathCmd::Arc { radius, start, end, x, y } => {
                let steps = ((end - start) / ARC_STEP).ceil().max(1.0) as usize;
                for i in 1..steps {
                    let a = start + (end - start) * i as f64 / steps as f64;
                    let (px, py) = polar(radius as f64, a);
                    path.line_to((px as f32, py as f32));
                }
                path.line_to((x, y));
            }
            PathCmd::Close => { path.close(); }
        }
    }
    path
}
