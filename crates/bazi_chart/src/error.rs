//! Error types for chart construction.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// The day-pillar source could not produce a pillar for the date.
    #[error("no day pillar for {date}: {reason}")]
    DayPillar { date: NaiveDate, reason: String },
    /// Date arithmetic left the representable range.
    #[error("timestamp out of range: {0}")]
    OutOfRange(String),
}
