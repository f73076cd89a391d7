// File: crates/crash-chart-core/src/render.rs
// Summary: Chart kinds and their renderers (grouped bars, labeled pie with legend).

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::aggregate::{count_for_operator_year, pie_values, series_peak, SeriesEntry};
use crate::error::{ChartError, Result};
use crate::geometry::PlotArea;
use crate::pie::{centroid, pie_layout, wedge_path};
use crate::record::IncidentRecord;
use crate::scale::{BandScale, LinearScale, OrdinalColor};
use crate::scene::{Anchor, Element, Transform};
use crate::theme::Theme;

/// Distance between the pie's rim and its labels.
const LABEL_INSET: f32 = 40.0;
const LEGEND_SWATCH: f32 = 18.0;
const LEGEND_ROW: f32 = 20.0;
const LEGEND_OFFSET: f32 = 100.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Bar, ChartKind::Pie];

    pub fn renderer(self) -> &'static dyn ChartRenderer {
        match self {
            ChartKind::Bar => &BarRenderer,
            ChartKind::Pie => &PieRenderer,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        })
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "pie" => Ok(ChartKind::Pie),
            _ => Err(ChartError::UnknownChartKind(s.to_string())),
        }
    }
}

/// Scales derived from one aggregated series.
#[derive(Clone, Debug)]
pub struct Scales {
    pub x: BandScale,
    pub y: LinearScale,
    pub color: OrdinalColor,
}

impl Scales {
    /// X bands over operators in series order; Y shared by both metrics from zero.
    pub fn build(series: &[SeriesEntry], area: &PlotArea, theme: &Theme, band_padding: f32) -> Self {
        let domain = series.iter().map(|e| e.operator.clone()).collect();
        let x = BandScale::new(domain, (0.0, area.width), band_padding);
        let y = LinearScale::new(0.0, area.height, 0.0, series_peak(series) as f64);
        Self { x, y, color: OrdinalColor::new(&theme.palette) }
    }
}

/// Everything a renderer may read besides the series and scales.
pub struct RenderContext<'a> {
    pub area: &'a PlotArea,
    pub theme: &'a Theme,
    /// Full dataset, for per-operator label counts.
    pub records: &'a [IncidentRecord],
    pub year: i32,
    pub font_size: f32,
}

pub trait ChartRenderer {
    fn kind(&self) -> ChartKind;
    /// Append this chart's elements to `layer`.
    fn render(&self, series: &[SeriesEntry], scales: &Scales, ctx: &RenderContext<'_>, layer: &mut Vec<Element>);
}

pub struct BarRenderer;

impl ChartRenderer for BarRenderer {
    fn kind(&self) -> ChartKind { ChartKind::Bar }

    fn render(&self, series: &[SeriesEntry], scales: &Scales, ctx: &RenderContext<'_>, layer: &mut Vec<Element>) {
        let half = scales.x.bandwidth() * 0.5;
        let height = ctx.area.height;

        for entry in series {
            let Some(x) = scales.x.position(&entry.operator) else { continue };
            let y_f = scales.y.to_px(entry.total_fatalities as f64);
            let y_a = scales.y.to_px(entry.total_aboard as f64);

            let fatalities = Element::rect(0.0, y_f, half, height - y_f)
                .class("bar fatalities")
                .fill(ctx.theme.fatalities)
                .title(format!("Operator: {}\nFatalities: {}", entry.operator, entry.total_fatalities));
            let aboard = Element::rect(half, y_a, half, height - y_a)
                .class("bar aboard")
                .fill(ctx.theme.aboard)
                .title(format!("Operator: {}\nAboard: {}", entry.operator, entry.total_aboard));

            layer.push(
                Element::group(vec![fatalities, aboard])
                    .class("grouped-bar")
                    .transform(Transform::translate(x, 0.0)),
            );
        }
    }
}

pub struct PieRenderer;

impl ChartRenderer for PieRenderer {
    fn kind(&self) -> ChartKind { ChartKind::Pie }

    fn render(&self, series: &[SeriesEntry], scales: &Scales, ctx: &RenderContext<'_>, layer: &mut Vec<Element>) {
        let data = pie_values(series);
        let slices = pie_layout(&data.iter().map(|d| d.value).collect::<Vec<_>>());
        let radius = ctx.area.width.min(ctx.area.height) * 0.5;
        let label_radius = (radius - LABEL_INSET).max(0.0);
        let (cx, cy) = ctx.area.center();

        for (slice, d) in slices.iter().zip(&data) {
            let color = scales.color.color(slice.index);
            let wedge = Element::path(wedge_path(slice, radius))
                .fill(color)
                .stroke(ctx.theme.slice_stroke)
                .title(format!(
                    "Operator: {}\nAccidents: {}\nFatalities: {}\nAboard: {}",
                    d.operator, d.value, d.fatalities, d.aboard
                ));

            let accidents = count_for_operator_year(ctx.records, &d.operator, ctx.year);
            let (lx, ly) = centroid(slice, label_radius, label_radius);
            let label = Element::text(lx, ly, ctx.font_size, format!(
                "{} ({} accident{})",
                d.operator,
                accidents,
                if accidents == 1 { "" } else { "s" }
            ))
            .anchored(Anchor::Middle, 0.35 * ctx.font_size)
            .fill(ctx.theme.axis_label);

            layer.push(
                Element::group(vec![wedge, label])
                    .class("arc")
                    .transform(Transform::translate(cx, cy)),
            );
        }

        for (i, d) in data.iter().enumerate() {
            let row = Element::group(vec![
                Element::rect(0.0, 0.0, LEGEND_SWATCH, LEGEND_SWATCH).fill(scales.color.color(i)),
                Element::text(LEGEND_SWATCH + 7.0, LEGEND_SWATCH * 0.5, ctx.font_size * 1.2, format!("{} - {}", d.operator, d.value))
                    .anchored(Anchor::Start, 0.35 * ctx.font_size * 1.2)
                    .fill(ctx.theme.axis_label),
            ])
            .class("legend")
            .transform(Transform::translate(ctx.area.width - LEGEND_OFFSET, i as f32 * LEGEND_ROW));
            layer.push(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shape;
    use crate::types::Insets;

    fn entry(op: &str, f: u64, a: u64) -> SeriesEntry {
        SeriesEntry { operator: op.into(), total_fatalities: f, total_aboard: a }
    }

    #[test]
    fn chart_kind_round_trips_names() {
        assert_eq!("PIE".parse::<ChartKind>().unwrap(), ChartKind::Pie);
        assert_eq!(ChartKind::Bar.to_string(), "bar");
        assert!(matches!("line".parse::<ChartKind>(), Err(ChartError::UnknownChartKind(_))));
        assert_eq!(ChartKind::Pie.renderer().kind(), ChartKind::Pie);
    }

    #[test]
    fn bar_pair_shares_band_without_overlap() {
        let area = PlotArea::new(1000, 600, Insets::default());
        let theme = Theme::light();
        let series = vec![entry("A", 10, 20)];
        let scales = Scales::build(&series, &area, &theme, 0.1);
        let ctx = RenderContext { area: &area, theme: &theme, records: &[], year: 1985, font_size: 10.0 };
        let mut layer = Vec::new();
        BarRenderer.render(&series, &scales, &ctx, &mut layer);

        assert_eq!(layer.len(), 1);
        let bars = layer[0].children();
        let (Shape::Rect { x: x0, width: w0, height: h0, .. }, Shape::Rect { x: x1, height: h1, .. }) =
            (&bars[0].shape, &bars[1].shape)
        else {
            panic!("expected two rects");
        };
        assert!(x0 + w0 <= *x1 + 1e-4);
        assert!((h1 / h0 - 2.0).abs() < 1e-4);
        assert!((h1 - area.height).abs() < 1e-3);
    }

    #[test]
    fn pie_emits_wedge_per_entry_and_legend() {
        let area = PlotArea::new(1000, 600, Insets::default());
        let theme = Theme::light();
        let series = vec![entry("A", 1, 1), entry("B", 3, 3)];
        let scales = Scales::build(&series, &area, &theme, 0.1);
        let records = vec![IncidentRecord::new("1985", "A", 1, 1)];
        let ctx = RenderContext { area: &area, theme: &theme, records: &records, year: 1985, font_size: 10.0 };
        let mut layer = Vec::new();
        PieRenderer.render(&series, &scales, &ctx, &mut layer);

        assert_eq!(layer.iter().filter(|e| e.has_class("arc")).count(), 2);
        assert_eq!(layer.iter().filter(|e| e.has_class("legend")).count(), 2);
        let label = &layer[0].children()[1];
        assert!(matches!(&label.shape, Shape::Text { content, .. } if content == "A (1 accident)"));
        assert_eq!(layer[1].children()[0].fill, Some(theme.palette[1]));
    }
}
