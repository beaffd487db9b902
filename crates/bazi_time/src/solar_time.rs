//! Civil time → apparent solar time.
//!
//! Steps: resolve a zone from the coordinates, localize the civil time with
//! historical DST rules, convert to UTC, then add the longitude offset and
//! the equation of time. The zi-hour marker is taken from the apparent hour.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use tracing::{debug, warn};

use crate::equation_of_time::equation_of_time_minutes;
use crate::error::TimeError;
use crate::solar_time_types::{
    DegradedReason, GeoLocation, NormalizedSolarTime, SpecialHour, TimeResolution,
};
use crate::timezone::{LocalKind, Localized, TimezoneResolver, localize, parse_zone};

const UTC_ZONE_ID: &str = "UTC";

/// Resolve a civil birth time at `location` into apparent solar time.
///
/// An unresolved or unknown zone yields [`TimeResolution::Degraded`]
/// computed as if the civil time were UTC. Errors are reserved for
/// arithmetic leaving chrono's range.
pub fn resolve_time<R>(
    date: NaiveDate,
    time: NaiveTime,
    location: &GeoLocation,
    resolver: &R,
) -> Result<TimeResolution, TimeError>
where
    R: TimezoneResolver + ?Sized,
{
    let civil = date.and_time(time);

    let zone = match resolver.resolve(location) {
        Some(id) => match parse_zone(&id) {
            Ok(tz) => Ok((tz, id)),
            Err(_) => Err(DegradedReason::UnknownZoneId(id)),
        },
        None => Err(DegradedReason::ZoneUnresolved),
    };

    match zone {
        Ok((tz, id)) => {
            let localized = localize(civil, tz)?;
            if localized.kind == LocalKind::Gap {
                warn!(%civil, zone = %id, "civil time falls in a DST gap; using pre-transition offset");
            }
            let time = apparent_from_utc(localized, id, location)?;
            debug!(apparent = %time.apparent, zone = %time.zone_id, "resolved solar time");
            Ok(TimeResolution::Resolved(time))
        }
        Err(reason) => {
            warn!(
                longitude = location.longitude_deg,
                latitude = location.latitude_deg,
                ?reason,
                "time zone unresolved; treating civil time as UTC"
            );
            let utc = Localized {
                utc: civil,
                is_dst: false,
                kind: LocalKind::Unique,
            };
            let time = apparent_from_utc(utc, UTC_ZONE_ID.to_string(), location)?;
            Ok(TimeResolution::Degraded { time, reason })
        }
    }
}

fn apparent_from_utc(
    localized: Localized,
    zone_id: String,
    location: &GeoLocation,
) -> Result<NormalizedSolarTime, TimeError> {
    let utc = localized.utc;
    let geo_offset_min = location.geo_offset_minutes();
    let equation_of_time_min = equation_of_time_minutes(utc.ordinal());
    let apparent = add_minutes(utc, geo_offset_min + equation_of_time_min)?;

    Ok(NormalizedSolarTime {
        apparent,
        utc,
        zone_id,
        is_dst: localized.is_dst,
        equation_of_time_min,
        geo_offset_min,
        special_hour: SpecialHour::for_hour(apparent.hour()),
    })
}

/// Shift by fractional minutes, rounded to the millisecond.
fn add_minutes(dt: NaiveDateTime, minutes: f64) -> Result<NaiveDateTime, TimeError> {
    let millis = (minutes * 60_000.0).round() as i64;
    dt.checked_add_signed(TimeDelta::milliseconds(millis))
        .ok_or_else(|| TimeError::OutOfRange(dt.to_string()))
}
