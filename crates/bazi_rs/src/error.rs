//! Error type for the facade.

use std::path::PathBuf;

use bazi_chart::ChartError;
use bazi_search::SearchError;
use bazi_time::TimeError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BaziError {
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    /// Configuration values that parse but cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
