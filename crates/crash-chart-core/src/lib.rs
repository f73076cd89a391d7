// File: crates/crash-chart-core/src/lib.rs
// Summary: Core library entry point; exports the record store, aggregation, chart pipeline and outputs.

pub mod aggregate;
pub mod axis;
pub mod chart;
pub mod controls;
pub mod dashboard;
pub mod error;
pub mod geometry;
pub mod pie;
pub mod raster;
pub mod record;
pub mod render;
pub mod scale;
pub mod scene;
pub mod svg;
pub mod text;
pub mod theme;
pub mod types;

pub use aggregate::{aggregate, count_for_operator_year, SeriesEntry};
pub use chart::{Chart, RenderOptions};
pub use controls::{ControlEvent, ControlSurface, Selection};
pub use dashboard::Dashboard;
pub use error::ChartError;
pub use record::{IncidentRecord, RecordStore, YearMode};
pub use render::{ChartKind, ChartRenderer};
pub use scene::Surface;
pub use theme::Theme;
