// File: crates/crash-chart-core/src/chart.rs
// Summary: Render options and the chart pipeline (aggregate -> scales -> axes -> renderer -> labels).

use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::aggregate::{aggregate, SeriesEntry};
use crate::axis::{self, AxisLabels};
use crate::controls::Selection;
use crate::error::{ChartError, Result};
use crate::geometry::PlotArea;
use crate::record::{RecordStore, YearMode};
use crate::render::{RenderContext, Scales};
use crate::scene::{Element, Surface};
use crate::theme::{self, Theme};
use crate::types::{Insets, HEIGHT, WIDTH};

pub const TITLE: &str = "Airplane Crashes by Operator and Count";

/// Canvas and styling knobs; deserializable from TOML, every field optional.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: String,
    pub year_mode: YearMode,
    pub band_padding: f32,
    pub font_size: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: "light".to_string(),
            year_mode: YearMode::Raw,
            band_padding: 0.1,
            font_size: 10.0,
        }
    }
}

impl RenderOptions {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn area(&self) -> PlotArea { PlotArea::new(self.width, self.height, self.insets) }
    pub fn resolve_theme(&self) -> Theme { theme::find(&self.theme) }
}

/// One aggregated chart for a selection.
#[derive(Clone, Debug)]
pub struct Chart {
    pub series: Vec<SeriesEntry>,
    pub selection: Selection,
    pub labels: AxisLabels,
}

impl Chart {
    pub fn build(store: &RecordStore, selection: &Selection, mode: YearMode) -> Self {
        let series = aggregate(store.records(), selection.year, &selection.operator, mode);
        Self { series, selection: selection.clone(), labels: AxisLabels::default() }
    }

    /// Title with the active filter context.
    pub fn title(&self) -> String {
        if self.selection.operator.is_empty() {
            format!("{} ({})", TITLE, self.selection.year)
        } else {
            format!("{} ({}, operator contains \"{}\")", TITLE, self.selection.year, self.selection.operator)
        }
    }

    /// Build the chart's layers in plot-local coordinates.
    pub fn elements(&self, store: &RecordStore, opts: &RenderOptions, theme: &Theme) -> Vec<Element> {
        let area = opts.area();
        let scales = Scales::build(&self.series, &area, theme, opts.band_padding);

        let mut layer = vec![
            axis::bottom(&scales.x, area.height, area.width, theme, opts.font_size),
            axis::left(&scales.y, theme, opts.font_size),
        ];

        let ctx = RenderContext {
            area: &area,
            theme,
            records: store.records(),
            year: self.selection.year,
            font_size: opts.font_size,
        };
        self.selection.chart.renderer().render(&self.series, &scales, &ctx, &mut layer);

        layer.extend(axis::captions(&area, &self.labels, theme, opts.font_size));
        layer.push(axis::title(&area, self.title(), theme, opts.font_size));
        layer
    }

    /// Clear `surface` and draw this chart into it.
    pub fn render_into(&self, surface: &mut Surface, store: &RecordStore, opts: &RenderOptions, theme: &Theme) {
        surface.clear();
        surface.mount(self.elements(store, opts, theme));
        info!(
            "rendered {} chart: year={} operator={:?} entries={}",
            self.selection.chart,
            self.selection.year,
            self.selection.operator,
            self.series.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ChartKind;

    #[test]
    fn options_from_partial_toml() {
        let opts = RenderOptions::from_toml_str(
            "theme = \"dark\"\nyear_mode = \"calendar\"\n[insets]\nleft = 100\n",
        )
        .unwrap();
        assert_eq!(opts.width, 1000);
        assert_eq!(opts.insets.left, 100);
        assert_eq!(opts.insets.bottom, 70);
        assert_eq!(opts.year_mode, YearMode::Calendar);
        assert_eq!(opts.resolve_theme().name, "dark");
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        assert!(matches!(RenderOptions::from_toml_str("width = \"wide\""), Err(ChartError::Config(_))));
    }

    #[test]
    fn title_mentions_filters() {
        let mut chart = Chart {
            series: Vec::new(),
            selection: Selection { year: 1985, operator: String::new(), chart: ChartKind::Bar },
            labels: AxisLabels::default(),
        };
        assert_eq!(chart.title(), "Airplane Crashes by Operator and Count (1985)");
        chart.selection.operator = "Aero".into();
        assert!(chart.title().ends_with("(1985, operator contains \"Aero\")"));
    }
}
