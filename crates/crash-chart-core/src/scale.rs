// File: crates/crash-chart-core/src/scale.rs
// Summary: Band (categorical X), linear value (Y) and ordinal color scales.

use skia_safe as skia;

/// Value Y coordinate (a count).
pub type Value = f64;

/// Categorical scale mapping keys to evenly spaced bands with padding.
/// Layout follows the usual band-scale rules: `padding` is applied both
/// between bands and at the outer edges, and the bands are centered.
#[derive(Clone, Debug)]
pub struct BandScale {
    domain: Vec<String>,
    start_px: f32,
    step: f32,
    bandwidth: f32,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f32, f32), padding: f32) -> Self {
        let padding = padding.clamp(0.0, 1.0);
        let (r0, r1) = range;
        let n = domain.len() as f32;
        let step = (r1 - r0) / (n - padding + padding * 2.0).max(1.0);
        let start_px = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        let bandwidth = step * (1.0 - padding);
        Self { domain, start_px, step, bandwidth }
    }

    /// Left edge of the band for `key`; `None` for keys outside the domain.
    pub fn position(&self, key: &str) -> Option<f32> {
        self.domain
            .iter()
            .position(|k| k == key)
            .map(|i| self.start_px + self.step * i as f32)
    }

    pub fn bandwidth(&self) -> f32 { self.bandwidth }
    pub fn step(&self) -> f32 { self.step }
    pub fn domain(&self) -> &[String] { &self.domain }
}

/// Vertical linear scale mapping `[vmin, vmax]` to `[bottom_px, top_px]`.
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: Value,
    pub vmax: Value,
}

impl LinearScale {
    /// Degenerate domains are widened by one unit so the mapping stays finite.
    pub fn new(top_px: f32, bottom_px: f32, vmin: Value, vmax: Value) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if !(s.vmax - s.vmin).is_finite() || (s.vmax - s.vmin).abs() < 1e-12 {
            s.vmax = s.vmin + 1.0;
        }
        s
    }

    #[inline]
    pub fn to_px(&self, y: Value) -> f32 {
        let span = self.vmax - self.vmin;
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }

    /// Round tick values covering the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<Value> {
        nice_ticks(self.vmin, self.vmax, count)
    }
}

/// Ticks at 1/2/5 x 10^k steps inside `[start, stop]`.
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let step = (hi - lo) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    // Work in integer multiples so ticks don't accumulate float drift.
    let (i1, i2, inc, inverted) = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let (mut i1, mut i2) = ((lo * inc).round(), (hi * inc).round());
        if i1 / inc < lo { i1 += 1.0; }
        if i2 / inc > hi { i2 -= 1.0; }
        (i1, i2, inc, true)
    } else {
        let inc = 10f64.powf(power) * factor;
        let (mut i1, mut i2) = ((lo / inc).round(), (hi / inc).round());
        if i1 * inc < lo { i1 += 1.0; }
        if i2 * inc > hi { i2 -= 1.0; }
        (i1, i2, inc, false)
    };
    if i2 < i1 {
        return Vec::new();
    }
    let n = (i2 - i1) as usize + 1;
    (0..n)
        .map(|k| {
            let i = i1 + k as f64;
            if inverted { i / inc } else { i * inc }
        })
        .collect()
}

/// Format a tick value with thousands separators, dropping a zero fraction.
pub fn format_tick(v: f64) -> String {
    if v.fract().abs() > 1e-9 {
        let s = format!("{:.6}", v);
        return s.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    let n = v.round() as i64;
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 { format!("-{grouped}") } else { grouped }
}

/// Categorical color assignment by slice index.
#[derive(Clone, Debug)]
pub struct OrdinalColor {
    palette: Vec<skia::Color>,
}

impl OrdinalColor {
    pub fn new(palette: &[skia::Color]) -> Self {
        Self { palette: palette.to_vec() }
    }

    pub fn color(&self, index: usize) -> skia::Color {
        if self.palette.is_empty() {
            return skia::Color::BLACK;
        }
        self.palette[index % self.palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_layout_with_padding() {
        let s = BandScale::new(vec!["a".into(), "b".into()], (0.0, 210.0), 0.1);
        // step = 210 / (2 - 0.1 + 0.2) = 100
        assert!((s.step() - 100.0).abs() < 1e-4);
        assert!((s.bandwidth() - 90.0).abs() < 1e-4);
        assert!((s.position("a").unwrap() - 10.0).abs() < 1e-4);
        assert!((s.position("b").unwrap() - 110.0).abs() < 1e-4);
        assert!(s.position("c").is_none());
    }

    #[test]
    fn linear_scale_is_inverted() {
        let s = LinearScale::new(0.0, 480.0, 0.0, 20.0);
        assert_eq!(s.to_px(0.0), 480.0);
        assert_eq!(s.to_px(20.0), 0.0);
        assert_eq!(s.to_px(10.0), 240.0);
    }

    #[test]
    fn degenerate_domain_is_widened() {
        let s = LinearScale::new(0.0, 100.0, 0.0, 0.0);
        assert_eq!(s.vmax, 1.0);
        assert_eq!(s.to_px(0.0), 100.0);
    }

    #[test]
    fn nice_ticks_cover_domain() {
        assert_eq!(nice_ticks(0.0, 20.0, 10), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0]);
        assert_eq!(nice_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        let t = nice_ticks(0.0, 523.0, 10);
        assert_eq!(t.first(), Some(&0.0));
        assert_eq!(t.last(), Some(&500.0));
    }

    #[test]
    fn tick_format_groups_thousands() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(1500.0), "1,500");
        assert_eq!(format_tick(1_000_000.0), "1,000,000");
        assert_eq!(format_tick(0.2), "0.2");
    }

    #[test]
    fn ordinal_color_wraps() {
        let c = OrdinalColor::new(&[skia::Color::RED, skia::Color::BLUE]);
        assert_eq!(c.color(0), skia::Color::RED);
        assert_eq!(c.color(3), skia::Color::BLUE);
    }
}
