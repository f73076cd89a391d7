// File: crates/crash-chart-core/src/svg.rs
// Summary: Serialize a surface's element tree to an SVG document.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use skia_safe as skia;

use crate::scene::{Element, PathCmd, Shape, Surface, Transform};
use crate::theme::{hex, Theme};

/// Full SVG document for the surface, including the background.
pub fn to_svg_string(surface: &Surface, theme: &Theme) -> String {
    let w = surface.area.canvas_width();
    let h = surface.area.canvas_height();
    let mut svg = String::new();

    // Writing into a String can't fail; ignore the fmt::Result throughout.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="sans-serif">"#
    );
    let _ = writeln!(svg, r#"  <rect class="background" width="100%" height="100%" fill="{}"/>"#, hex(theme.background));
    if let Some(root) = surface.root() {
        write_element(&mut svg, root, 1);
    }
    svg.push_str("</svg>\n");
    svg
}

/// Write the SVG document to `path`, creating parent directories.
pub fn write_svg(surface: &Surface, theme: &Theme, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_svg_string(surface, theme))?;
    Ok(())
}

fn write_element(svg: &mut String, el: &Element, depth: usize) {
    let pad = "  ".repeat(depth);
    let attrs = common_attrs(el);
    let title = el.title.as_deref().map(|t| format!("<title>{}</title>", escape(t)));

    match &el.shape {
        Shape::Group(children) => {
            let _ = writeln!(svg, "{pad}<g{attrs}>");
            if let Some(t) = &title {
                let _ = writeln!(svg, "{pad}  {t}");
            }
            for c in children {
                write_element(svg, c, depth + 1);
            }
            let _ = writeln!(svg, "{pad}</g>");
        }
        Shape::Rect { x, y, width, height } => {
            let open = format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}"{attrs}"#,
                num(*x), num(*y), num(width.max(0.0)), num(height.max(0.0))
            );
            close_leaf(svg, &pad, &open, "rect", title.as_deref());
        }
        Shape::Line { x1, y1, x2, y2 } => {
            let open = format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{attrs}"#,
                num(*x1), num(*y1), num(*x2), num(*y2)
            );
            close_leaf(svg, &pad, &open, "line", title.as_deref());
        }
        Shape::Path(cmds) => {
            let open = format!(r#"<path d="{}"{attrs}"#, path_data(cmds));
            close_leaf(svg, &pad, &open, "path", title.as_deref());
        }
        Shape::Text { x, y, dy, anchor, size, content } => {
            let _ = write!(
                svg,
                r#"{pad}<text x="{}" y="{}" dy="{}" text-anchor="{}" font-size="{}"{attrs}>"#,
                num(*x), num(*y), num(*dy), anchor.as_str(), num(*size)
            );
            if let Some(t) = &title {
                svg.push_str(t);
            }
            let _ = writeln!(svg, "{}</text>", escape(content));
        }
    }
}

fn close_leaf(svg: &mut String, pad: &str, open: &str, tag: &str, title: Option<&str>) {
    match title {
        Some(t) => {
            let _ = writeln!(svg, "{pad}{open}>{t}</{tag}>");
        }
        None => {
            let _ = writeln!(svg, "{pad}{open}/>");
        }
    }
}

fn common_attrs(el: &Element) -> String {
    let mut out = String::new();
    if let Some(class) = &el.class {
        let _ = write!(out, r#" class="{}""#, escape(class));
    }
    if !el.transform.is_identity() {
        let _ = write!(out, r#" transform="{}""#, transform_attr(&el.transform));
    }
    // Lines default to an unfilled stroke; everything else to a black fill.
    match (&el.shape, el.fill) {
        (Shape::Group(_), None) => {}
        (Shape::Line { .. }, None) => out.push_str(r#" fill="none""#),
        (_, Some(c)) => write_color(&mut out, "fill", c),
        _ => {}
    }
    if let Some(c) = el.stroke {
        write_color(&mut out, "stroke", c);
    }
    out
}

fn write_color(out: &mut String, attr: &str, c: skia::Color) {
    let _ = write!(out, r#" {attr}="{}""#, hex(c));
    if c.a() < 255 {
        let _ = write!(out, r#" {attr}-opacity="{}""#, num(c.a() as f32 / 255.0));
    }
}

fn transform_attr(t: &Transform) -> String {
    let mut parts = Vec::new();
    if t.translate != (0.0, 0.0) {
        parts.push(format!("translate({},{})", num(t.translate.0), num(t.translate.1)));
    }
    if t.rotate != 0.0 {
        parts.push(format!("rotate({})", num(t.rotate)));
    }
    parts.join(" ")
}

/// SVG path data; arcs use the large-arc flag from their angular span and always sweep clockwise.
pub fn path_data(cmds: &[PathCmd]) -> String {
    let mut d = String::new();
    for cmd in cmds {
        match *cmd {
            PathCmd::MoveTo(x, y) => { let _ = write!(d, "M{},{}", num(x), num(y)); }
            PathCmd::LineTo(x, y) => { let _ = write!(d, "L{},{}", num(x), num(y)); }
            PathCmd::Arc { radius, start, end, x, y } => {
                let large = if end - start > std::f64::consts::PI { 1 } else { 0 };
                let _ = write!(d, "A{r},{r},0,{large},1,{},{}", num(x), num(y), r = num(radius));
            }
            PathCmd::Close => d.push('Z'),
        }
    }
    d
}

/// Compact number formatting: at most 3 decimals, no trailing zeros, no "-0".
fn num(v: f32) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PlotArea;
    use crate::types::Insets;

    #[test]
    fn number_formatting() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(0.35), "0.35");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(-45.0), "-45");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("A&B <Co>"), "A&amp;B &lt;Co&gt;");
    }

    #[test]
    fn empty_surface_is_just_background() {
        let surface = Surface::new(PlotArea::new(1000, 600, Insets::default()));
        let svg = to_svg_string(&surface, &Theme::light());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="1000" height="600""#));
        assert!(!svg.contains("<g"));
    }

    #[test]
    fn tooltips_become_title_children() {
        let mut surface = Surface::new(PlotArea::new(1000, 600, Insets::default()));
        surface.mount(vec![Element::rect(0.0, 1.0, 2.0, 3.0).class("bar").title("Operator: A&B")]);
        let svg = to_svg_string(&surface, &Theme::light());
        assert!(svg.contains(r#"<g class="chart" transform="translate(80,50)">"#));
        assert!(svg.contains("<title>Operator: A&amp;B</title></rect>"));
    }

    #[test]
    fn large_arc_flag() {
        let d = path_data(&[
            PathCmd::MoveTo(0.0, -10.0),
            PathCmd::Arc { radius: 10.0, start: 0.0, end: 4.0, x: -7.568, y: 6.536 },
            PathCmd::LineTo(0.0, 0.0),
            PathCmd::Close,
        ]);
        assert_eq!(d, "M0,-10A10,10,0,1,1,-7.568,6.536L0,0Z");
    }
}
