// File: crates/crash-chart-core/src/geometry.rs
// Summary: Plot-area math (canvas size minus margins) and angle helpers.

use crate::types::Insets;

/// Inner drawing area of a canvas, in the chart group's local coordinates.
/// The chart group is translated by `(insets.left, insets.top)`, so the plot
/// spans `[0, width] x [0, height]` locally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub width: f32,
    pub height: f32,
    pub insets: Insets,
}

impl PlotArea {
    pub fn new(canvas_width: i32, canvas_height: i32, insets: Insets) -> Self {
        let width = (canvas_width - insets.hsum() as i32).max(1) as f32;
        let height = (canvas_height - insets.vsum() as i32).max(1) as f32;
        Self { width, height, insets }
    }

    /// Full canvas width (plot + horizontal margins).
    pub fn canvas_width(&self) -> f32 { self.width + self.insets.hsum() as f32 }
    /// Full canvas height (plot + vertical margins).
    pub fn canvas_height(&self) -> f32 { self.height + self.insets.vsum() as f32 }

    pub fn center(&self) -> (f32, f32) { (self.width * 0.5, self.height * 0.5) }
}

/// Point on a circle of radius `r` for an angle measured clockwise from 12 o'clock.
#[inline]
pub fn polar(r: f64, angle: f64) -> (f64, f64) {
    (r * angle.sin(), -r * angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_canvas_plot_area() {
        let area = PlotArea::new(1000, 600, Insets::default());
        assert_eq!(area.width, 870.0);
        assert_eq!(area.height, 480.0);
        assert_eq!(area.canvas_width(), 1000.0);
    }

    #[test]
    fn polar_starts_at_twelve_oclock() {
        let (x, y) = polar(10.0, 0.0);
        assert!(x.abs() < 1e-12);
        assert!((y + 10.0).abs() < 1e-12);
        let (x, y) = polar(10.0, std::f64::consts::FRAC_PI_2);
        assert!((x - 10.0).abs() < 1e-12);
        assert!(y.abs() < 1e-9);
    }
}
