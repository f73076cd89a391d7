// File: crates/crash-chart-core/src/scene.rs
// Summary: Retained element tree (groups, rects, paths, text) and the surface that holds one chart.
// Notes:
// - Renderers build `Element`s; the SVG writer and the Skia raster backend both
//   walk the same tree, so the two outputs never disagree about content.

use skia_safe as skia;

use crate::geometry::PlotArea;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub translate: (f32, f32),
    /// Degrees, applied after the translation.
    pub rotate: f32,
}

impl Transform {
    pub fn translate(x: f32, y: f32) -> Self { Self { translate: (x, y), rotate: 0.0 } }
    pub fn rotate(deg: f32) -> Self { Self { translate: (0.0, 0.0), rotate: deg } }
    pub fn is_identity(&self) -> bool { self.translate == (0.0, 0.0) && self.rotate == 0.0 }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    /// Clockwise circular arc about the local origin, ending at `(x, y)`.
    /// Angles (from 12 o'clock) are kept so rasterizers can flatten it.
    Arc { radius: f32, start: f64, end: f64, x: f32, y: f32 },
    Close,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Group(Vec<Element>),
    Rect { x: f32, y: f32, width: f32, height: f32 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Path(Vec<PathCmd>),
    Text { x: f32, y: f32, dy: f32, anchor: Anchor, size: f32, content: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub shape: Shape,
    pub class: Option<String>,
    pub transform: Transform,
    pub fill: Option<skia::Color>,
    pub stroke: Option<skia::Color>,
    /// Hover tooltip.
    pub title: Option<String>,
}

impl Element {
    fn with_shape(shape: Shape) -> Self {
        Self { shape, class: None, transform: Transform::default(), fill: None, stroke: None, title: None }
    }

    pub fn group(children: Vec<Element>) -> Self { Self::with_shape(Shape::Group(children)) }

    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::with_shape(Shape::Rect { x, y, width, height })
    }

    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::with_shape(Shape::Line { x1, y1, x2, y2 })
    }

    pub fn path(cmds: Vec<PathCmd>) -> Self { Self::with_shape(Shape::Path(cmds)) }

    pub fn text(x: f32, y: f32, size: f32, content: impl Into<String>) -> Self {
        Self::with_shape(Shape::Text { x, y, dy: 0.0, anchor: Anchor::Start, size, content: content.into() })
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn transform(mut self, t: Transform) -> Self {
        self.transform = t;
        self
    }

    pub fn fill(mut self, c: skia::Color) -> Self {
        self.fill = Some(c);
        self
    }

    pub fn stroke(mut self, c: skia::Color) -> Self {
        self.stroke = Some(c);
        self
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = Some(t.into());
        self
    }

    /// Set anchor and baseline shift; no-op on non-text shapes.
    pub fn anchored(mut self, anchor: Anchor, dy: f32) -> Self {
        if let Shape::Text { anchor: a, dy: d, .. } = &mut self.shape {
            *a = anchor;
            *d = dy;
        }
        self
    }

    pub fn children(&self) -> &[Element] {
        match &self.shape {
            Shape::Group(c) => c,
            _ => &[],
        }
    }

    /// Does the space-separated class list contain `name`?
    pub fn has_class(&self, name: &str) -> bool {
        self.class.as_deref().is_some_and(|c| c.split_whitespace().any(|p| p == name))
    }

    /// Depth-first visit of this element and all descendants.
    pub fn walk<'a>(&'a self, out: &mut Vec<&'a Element>) {
        out.push(self);
        for c in self.children() {
            c.walk(out);
        }
    }
}

/// The container a chart is drawn into. Holds at most one chart at a time.
#[derive(Clone, Debug)]
pub struct Surface {
    pub area: PlotArea,
    root: Option<Element>,
}

impl Surface {
    pub fn new(area: PlotArea) -> Self { Self { area, root: None } }

    /// Remove every chart element.
    pub fn clear(&mut self) { self.root = None; }

    /// Replace the chart with `layers`, wrapped in a group translated by the margins.
    pub fn mount(&mut self, layers: Vec<Element>) {
        let insets = self.area.insets;
        let root = Element::group(layers)
            .class("chart")
            .transform(Transform::translate(insets.left as f32, insets.top as f32));
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<&Element> { self.root.as_ref() }
    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// All elements currently on the surface, depth-first.
    pub fn elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.walk(&mut out);
        }
        out
    }

    pub fn find_by_class(&self, name: &str) -> Vec<&Element> {
        self.elements().into_iter().filter(|e| e.has_class(name)).collect()
    }
}
