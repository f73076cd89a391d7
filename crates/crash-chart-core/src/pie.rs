// File: crates/crash-chart-core/src/pie.rs
// Summary: Pie layout (slice angles) and wedge path/centroid geometry.
// Notes:
// - Angles are radians, clockwise from 12 o'clock, covering [0, 2π].
// - Slices are laid out largest-first (stable for ties); results are returned
//   in data order so index-based coloring follows the input series.

use std::f64::consts::{PI, TAU};

use crate::geometry::polar;
use crate::scene::PathCmd;

const EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieSlice {
    /// Position in the input data.
    pub index: usize,
    pub value: f64,
    pub start: f64,
    pub end: f64,
}

impl PieSlice {
    pub fn span(&self) -> f64 { self.end - self.start }
    pub fn mid(&self) -> f64 { (self.start + self.end) * 0.5 }
}

/// Assign each value an angular span proportional to it. Non-positive values get
/// an empty span; if nothing is positive every span is empty.
pub fn pie_layout(values: &[f64]) -> Vec<PieSlice> {
    let sum: f64 = values.iter().copied().filter(|v| *v > 0.0).sum();
    let k = if sum > 0.0 { TAU / sum } else { 0.0 };

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].partial_cmp(&values[a]).unwrap_or(std::cmp::Ordering::Equal));

    let mut slices = vec![PieSlice { index: 0, value: 0.0, start: 0.0, end: 0.0 }; values.len()];
    let mut a0 = 0.0;
    for &i in &order {
        let v = values[i];
        let a1 = a0 + if v > 0.0 { v * k } else { 0.0 };
        slices[i] = PieSlice { index: i, value: v, start: a0, end: a1 };
        a0 = a1;
    }
    slices
}

/// Wedge outline centered on the origin.
pub fn wedge_path(slice: &PieSlice, radius: f32) -> Vec<PathCmd> {
    let r = radius as f64;
    let span = slice.span();
    if span <= EPSILON || r <= 0.0 {
        return vec![PathCmd::MoveTo(0.0, 0.0), PathCmd::Close];
    }
    if span >= TAU - EPSILON {
        // A full turn can't be one arc command; split it at the half-turn.
        let (x0, y0) = polar(r, slice.start);
        let (x1, y1) = polar(r, slice.start + PI);
        return vec![
            PathCmd::MoveTo(x0 as f32, y0 as f32),
            PathCmd::Arc { radius, start: slice.start, end: slice.start + PI, x: x1 as f32, y: y1 as f32 },
            PathCmd::Arc { radius, start: slice.start + PI, end: slice.end, x: x0 as f32, y: y0 as f32 },
            PathCmd::Close,
        ];
    }
    let (x0, y0) = polar(r, slice.start);
    let (x1, y1) = polar(r, slice.end);
    vec![
        PathCmd::MoveTo(x0 as f32, y0 as f32),
        PathCmd::Arc { radius, start: slice.start, end: slice.end, x: x1 as f32, y: y1 as f32 },
        PathCmd::LineTo(0.0, 0.0),
        PathCmd::Close,
    ]
}

/// Midpoint of the slice's angular span on a ring between `inner` and `outer`.
pub fn centroid(slice: &PieSlice, inner: f32, outer: f32) -> (f32, f32) {
    let r = (inner as f64 + outer as f64) * 0.5;
    let (x, y) = polar(r, slice.mid());
    (x as f32, y as f32)
}
