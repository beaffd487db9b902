//! Input and output types for apparent-solar-time resolution.

use bazi_base::Gender;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::Serialize;
use tracing::warn;

use crate::error::TimeError;

/// Geographic location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoLocation {
    /// Longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
}

impl GeoLocation {
    /// Create a location, rejecting out-of-range or non-finite coordinates.
    pub fn new(longitude_deg: f64, latitude_deg: f64) -> Result<Self, TimeError> {
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(TimeError::InvalidLongitude(longitude_deg));
        }
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(TimeError::InvalidLatitude(latitude_deg));
        }
        Ok(Self {
            longitude_deg,
            latitude_deg,
        })
    }

    /// Local mean time offset from UTC: 4 minutes per degree of longitude.
    pub fn geo_offset_minutes(&self) -> f64 {
        self.longitude_deg * 4.0
    }
}

/// Birth input: civil date and time (minute precision), place and gender.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BirthMoment {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: GeoLocation,
    pub gender: Gender,
}

impl BirthMoment {
    /// Seconds and sub-seconds of `time` are dropped.
    pub fn new(date: NaiveDate, time: NaiveTime, location: GeoLocation, gender: Gender) -> Self {
        let time = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
        Self {
            date,
            time,
            location,
            gender,
        }
    }

    pub fn civil(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Marker for the two hours straddling midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpecialHour {
    Normal,
    /// Apparent hour 0: recorded only, no date shift.
    EarlyZi,
    /// Apparent hour 23: the chart date advances one day.
    LateZi,
}

impl SpecialHour {
    pub const fn for_hour(hour: u32) -> Self {
        match hour {
            23 => Self::LateZi,
            0 => Self::EarlyZi,
            _ => Self::Normal,
        }
    }
}

/// Civil time corrected to apparent solar time at the birth longitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSolarTime {
    /// Apparent solar time, free of any zone.
    pub apparent: NaiveDateTime,
    /// The instant in UTC.
    pub utc: NaiveDateTime,
    /// IANA zone used for localization (`"UTC"` when degraded).
    pub zone_id: String,
    pub is_dst: bool,
    pub equation_of_time_min: f64,
    pub geo_offset_min: f64,
    pub special_hour: SpecialHour,
}

impl NormalizedSolarTime {
    /// Time used for the day and hour pillars.
    ///
    /// Late-zi moves to the next day; month and year stay keyed to
    /// [`Self::apparent`].
    pub fn chart_time(&self) -> NaiveDateTime {
        match self.special_hour {
            SpecialHour::LateZi => match self.apparent.checked_add_signed(TimeDelta::days(1)) {
                Some(next) => next,
                None => {
                    warn!(
                        apparent = %self.apparent,
                        "late-zi shift out of range; day not advanced"
                    );
                    self.apparent
                }
            },
            SpecialHour::Normal | SpecialHour::EarlyZi => self.apparent,
        }
    }
}

/// Why a resolution fell back to UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DegradedReason {
    /// The resolver found no zone for the coordinates.
    ZoneUnresolved,
    /// The resolver named a zone the tz database does not know.
    UnknownZoneId(String),
}

/// Outcome of time resolution, keeping a UTC fallback distinguishable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TimeResolution {
    Resolved(NormalizedSolarTime),
    Degraded {
        time: NormalizedSolarTime,
        reason: DegradedReason,
    },
}

impl TimeResolution {
    pub fn time(&self) -> &NormalizedSolarTime {
        match self {
            Self::Resolved(t) | Self::Degraded { time: t, .. } => t,
        }
    }

    pub fn into_time(self) -> NormalizedSolarTime {
        match self {
            Self::Resolved(t) | Self::Degraded { time: t, .. } => t,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn degraded_reason(&self) -> Option<&DegradedReason> {
        match self {
            Self::Resolved(_) => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }
}
