//! Error types for time resolution.

use thiserror::Error;

/// Unrecoverable failures while resolving civil time.
///
/// An unresolved time zone is not an error; it yields a degraded
/// [`TimeResolution`](crate::TimeResolution).
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Longitude outside [-180, 180] degrees.
    #[error("longitude {0} outside [-180, 180]")]
    InvalidLongitude(f64),
    /// Latitude outside [-90, 90] degrees.
    #[error("latitude {0} outside [-90, 90]")]
    InvalidLatitude(f64),
    /// Not an IANA time-zone identifier known to the tz database.
    #[error("unknown time zone id: {0:?}")]
    InvalidZoneId(String),
    /// A region rectangle with inverted or out-of-range bounds.
    #[error("invalid zone region for {0:?}")]
    InvalidRegion(String),
    /// Date arithmetic left the representable range.
    #[error("timestamp out of range: {0}")]
    OutOfRange(String),
}
