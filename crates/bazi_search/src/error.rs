//! Error types for node-term search.

use bazi_time::TimeError;
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::solar_term::NodeTerm;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Invalid search configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// The bracket around the typical date held no longitude crossing.
    #[error("no crossing for {term} in {year}")]
    NoConvergence { term: NodeTerm, year: i32 },
    /// No boundary interval encloses the moment; the three-year window
    /// should always cover it.
    #[error("no node-term interval encloses {0}")]
    BoundaryNotFound(NaiveDateTime),
    /// Date arithmetic or conversion failure.
    #[error(transparent)]
    Time(#[from] TimeError),
}
