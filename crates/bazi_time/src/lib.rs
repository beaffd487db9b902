//! Civil birth time to apparent solar time.
//!
//! This crate provides:
//! - Coordinate → IANA zone lookup behind the [`TimezoneResolver`] trait,
//!   with a polygon-backed default ([`PolygonResolver`])
//! - DST-aware localization (ambiguous times resolve to standard time)
//! - Longitude offset and equation-of-time correction
//! - Julian Date helpers and ΔT for the astronomical search crates

pub mod delta_t;
pub mod equation_of_time;
pub mod error;
pub mod julian;
pub mod solar_time;
pub mod solar_time_types;
pub mod timezone;

pub use delta_t::{delta_t_days, delta_t_seconds};
pub use equation_of_time::equation_of_time_minutes;
pub use error::TimeError;
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar, jd_to_naive, julian_day_number,
    naive_to_jd,
};
pub use solar_time::resolve_time;
pub use solar_time_types::{
    BirthMoment, DegradedReason, GeoLocation, NormalizedSolarTime, SpecialHour, TimeResolution,
};
pub use timezone::{
    FixedZoneResolver, LocalKind, PolygonResolver, RegionResolver, TimezoneResolver, ZoneRegion,
};
