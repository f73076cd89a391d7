// File: crates/crash-chart-core/src/error.rs
// Summary: Library error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("control '{0}' not found")]
    MissingControl(&'static str),
    #[error("control '{0}' has no selected value")]
    EmptyControl(&'static str),
    #[error("'{value}' is not an option of control '{control}'")]
    InvalidOption { control: &'static str, value: String },
    #[error("unknown chart type '{0}' (expected bar or pie)")]
    UnknownChartKind(String),
    #[error("unknown year mode '{0}' (expected raw or calendar)")]
    UnknownYearMode(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
