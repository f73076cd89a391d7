// File: crates/crash-chart-core/src/dashboard.rs
// Summary: Two-stage driver: load once, then re-render on every control event.
// Notes:
// - A `Dashboard` only exists after the record store has loaded, so the
//   interactive stage can never observe a half-initialized dataset.
// - Each render clears the surface first; exactly one chart is live.

use std::path::Path;

use log::{error, info};

use crate::chart::{Chart, RenderOptions};
use crate::controls::{ControlEvent, ControlSurface, Selection};
use crate::error::Result;
use crate::record::RecordStore;
use crate::scene::Surface;
use crate::theme::Theme;
use crate::{raster, svg};

pub struct Dashboard {
    store: RecordStore,
    controls: ControlSurface,
    surface: Surface,
    opts: RenderOptions,
    theme: Theme,
    chart: Option<Chart>,
}

impl Dashboard {
    /// Load the dataset at `path`, populate the controls and draw the initial chart.
    pub fn initialize(path: impl AsRef<Path>, opts: RenderOptions) -> Result<Self> {
        let store = RecordStore::load(path)?;
        Ok(Self::with_store(store, opts))
    }

    pub fn with_store(store: RecordStore, opts: RenderOptions) -> Self {
        let controls = ControlSurface::populate(&store, opts.year_mode);
        let surface = Surface::new(opts.area());
        let theme = opts.resolve_theme();
        let mut dashboard = Self { store, controls, surface, opts, theme, chart: None };
        dashboard.update();
        dashboard
    }

    pub fn store(&self) -> &RecordStore { &self.store }
    pub fn controls(&self) -> &ControlSurface { &self.controls }
    pub fn controls_mut(&mut self) -> &mut ControlSurface { &mut self.controls }
    pub fn surface(&self) -> &Surface { &self.surface }
    pub fn options(&self) -> &RenderOptions { &self.opts }
    pub fn chart(&self) -> Option<&Chart> { self.chart.as_ref() }

    pub fn selection(&self) -> Result<Selection> { self.controls.selection() }

    /// Apply one control change and re-render. Returns whether a chart was drawn.
    pub fn handle(&mut self, event: ControlEvent) -> Result<bool> {
        self.controls.apply(&event)?;
        info!("{} -> {:?}", event.target(), event);
        Ok(self.update())
    }

    /// Re-render from the current selection. A missing or empty control aborts
    /// this render (logged) and leaves the previous chart in place.
    pub fn update(&mut self) -> bool {
        let selection = match self.controls.selection() {
            Ok(s) => s,
            Err(e) => {
                error!("render aborted: {e}");
                return false;
            }
        };
        let chart = Chart::build(&self.store, &selection, self.opts.year_mode);
        chart.render_into(&mut self.surface, &self.store, &self.opts, &self.theme);
        self.chart = Some(chart);
        true
    }

    pub fn to_svg(&self) -> String { svg::to_svg_string(&self.surface, &self.theme) }

    pub fn write_svg(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        svg::write_svg(&self.surface, &self.theme, path)
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        raster::render_to_png(&self.surface, &self.theme, path)
    }

    pub fn png_bytes(&self) -> anyhow::Result<Vec<u8>> {
        raster::render_png_bytes(&self.surface, &self.theme)
    }
}
