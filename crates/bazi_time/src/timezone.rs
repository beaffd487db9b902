//! Time-zone lookup from coordinates and DST-aware localization.

use chrono::{NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono::offset::LocalResult;
use chrono_tz::{OffsetComponents, Tz};
use serde::{Deserialize, Serialize};
use tzf_rs::DefaultFinder;

use crate::error::TimeError;
use crate::solar_time_types::GeoLocation;

/// Maps coordinates to an IANA time-zone identifier.
///
/// `None` means the coordinates fall outside every known zone (open ocean,
/// unmapped territory); the caller degrades to UTC.
pub trait TimezoneResolver: Send + Sync {
    fn resolve(&self, location: &GeoLocation) -> Option<String>;
}

/// Resolver that always answers with one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedZoneResolver {
    zone: Tz,
}

impl FixedZoneResolver {
    /// Validate `zone_id` against the tz database.
    pub fn new(zone_id: &str) -> Result<Self, TimeError> {
        let zone = parse_zone(zone_id)?;
        Ok(Self { zone })
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }
}

impl TimezoneResolver for FixedZoneResolver {
    fn resolve(&self, _location: &GeoLocation) -> Option<String> {
        Some(self.zone.name().to_string())
    }
}

/// Longitude/latitude rectangle mapped to a zone (bounds inclusive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRegion {
    pub zone: String,
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl ZoneRegion {
    pub fn new(zone: &str, lon: (f64, f64), lat: (f64, f64)) -> Self {
        Self {
            zone: zone.to_string(),
            lon_min: lon.0,
            lon_max: lon.1,
            lat_min: lat.0,
            lat_max: lat.1,
        }
    }

    pub fn contains(&self, location: &GeoLocation) -> bool {
        (self.lon_min..=self.lon_max).contains(&location.longitude_deg)
            && (self.lat_min..=self.lat_max).contains(&location.latitude_deg)
    }

    fn validate(&self) -> Result<(), TimeError> {
        let lon_ok = -180.0 <= self.lon_min && self.lon_min <= self.lon_max && self.lon_max <= 180.0;
        let lat_ok = -90.0 <= self.lat_min && self.lat_min <= self.lat_max && self.lat_max <= 90.0;
        if !(lon_ok && lat_ok) {
            return Err(TimeError::InvalidRegion(self.zone.clone()));
        }
        parse_zone(&self.zone).map(|_| ())
    }
}

/// First-match lookup over an ordered list of rectangles.
///
/// Only built from caller-supplied regions. Smaller regions must precede
/// the larger ones that enclose them.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionResolver {
    regions: Vec<ZoneRegion>,
}

impl RegionResolver {
    /// Validate every region's bounds and zone id.
    pub fn new(regions: Vec<ZoneRegion>) -> Result<Self, TimeError> {
        for r in &regions {
            r.validate()?;
        }
        Ok(Self { regions })
    }

    pub fn regions(&self) -> &[ZoneRegion] {
        &self.regions
    }
}

impl TimezoneResolver for RegionResolver {
    fn resolve(&self, location: &GeoLocation) -> Option<String> {
        self.regions
            .iter()
            .find(|r| r.contains(location))
            .map(|r| r.zone.clone())
    }
}

/// Zone lookup against the global timezone-boundary polygons.
///
/// Ocean zones (`Etc/GMT±N`) count as unresolved.
pub struct PolygonResolver {
    finder: DefaultFinder,
}

impl PolygonResolver {
    /// Load the bundled boundary data.
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }
}

impl Default for PolygonResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PolygonResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolygonResolver").finish_non_exhaustive()
    }
}

impl TimezoneResolver for PolygonResolver {
    fn resolve(&self, location: &GeoLocation) -> Option<String> {
        let name = self
            .finder
            .get_tz_name(location.longitude_deg, location.latitude_deg);
        if name.is_empty() || name.starts_with("Etc/") {
            return None;
        }
        Some(name.to_string())
    }
}

/// Parse an IANA zone identifier.
pub fn parse_zone(zone_id: &str) -> Result<Tz, TimeError> {
    zone_id
        .parse::<Tz>()
        .map_err(|_| TimeError::InvalidZoneId(zone_id.to_string()))
}

/// How a civil time mapped onto the zone's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LocalKind {
    /// Exactly one instant.
    Unique,
    /// Repeated hour at a fall-back transition; standard time was chosen.
    Ambiguous,
    /// Skipped hour at a spring-forward transition; the pre-transition
    /// offset was applied.
    Gap,
}

/// A civil time pinned to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized {
    pub utc: NaiveDateTime,
    pub is_dst: bool,
    pub kind: LocalKind,
}

/// Localize a civil time in `zone`, applying historical DST rules.
pub fn localize(civil: NaiveDateTime, zone: Tz) -> Result<Localized, TimeError> {
    match zone.from_local_datetime(&civil) {
        LocalResult::Single(dt) => Ok(Localized {
            utc: dt.naive_utc(),
            is_dst: is_dst(&dt),
            kind: LocalKind::Unique,
        }),
        LocalResult::Ambiguous(a, b) => {
            let standard = if is_dst(&a) { b } else { a };
            Ok(Localized {
                utc: standard.naive_utc(),
                is_dst: is_dst(&standard),
                kind: LocalKind::Ambiguous,
            })
        }
        LocalResult::None => {
            let probe = civil
                .checked_sub_signed(TimeDelta::hours(3))
                .ok_or_else(|| out_of_range(civil))?;
            let before = zone
                .from_local_datetime(&probe)
                .earliest()
                .ok_or_else(|| out_of_range(civil))?;
            let offset = TimeDelta::seconds(i64::from(before.offset().fix().local_minus_utc()));
            let utc = civil
                .checked_sub_signed(offset)
                .ok_or_else(|| out_of_range(civil))?;
            let after = zone.from_utc_datetime(&utc);
            Ok(Localized {
                utc,
                is_dst: is_dst(&after),
                kind: LocalKind::Gap,
            })
        }
    }
}

fn is_dst(dt: &chrono::DateTime<Tz>) -> bool {
    dt.offset().dst_offset() != TimeDelta::zero()
}

fn out_of_range(civil: NaiveDateTime) -> TimeError {
    TimeError::OutOfRange(civil.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn civil(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn loc(lon: f64, lat: f64) -> GeoLocation {
        GeoLocation::new(lon, lat).unwrap()
    }

    #[test]
    fn shanghai_1984_has_no_dst() {
        let tz = parse_zone("Asia/Shanghai").unwrap();
        let l = localize(civil(1984, 2, 4, 10, 0), tz).unwrap();
        assert_eq!(l.utc, civil(1984, 2, 4, 2, 0));
        assert!(!l.is_dst);
        assert_eq!(l.kind, LocalKind::Unique);
    }

    #[test]
    fn china_summer_time_1988() {
        let tz = parse_zone("Asia/Shanghai").unwrap();
        let l = localize(civil(1988, 7, 1, 12, 0), tz).unwrap();
        assert!(l.is_dst);
        assert_eq!(l.utc, civil(1988, 7, 1, 3, 0));
    }

    #[test]
    fn fall_back_picks_standard_time() {
        let tz = parse_zone("America/New_York").unwrap();
        let l = localize(civil(2021, 11, 7, 1, 30), tz).unwrap();
        assert_eq!(l.kind, LocalKind::Ambiguous);
        assert!(!l.is_dst);
        assert_eq!(l.utc, civil(2021, 11, 7, 6, 30));
    }

    #[test]
    fn spring_forward_gap_uses_prior_offset() {
        let tz = parse_zone("America/New_York").unwrap();
        let l = localize(civil(2021, 3, 14, 2, 30), tz).unwrap();
        assert_eq!(l.kind, LocalKind::Gap);
        assert_eq!(l.utc, civil(2021, 3, 14, 7, 30));
        assert!(l.is_dst);
    }

    fn east_asia() -> RegionResolver {
        RegionResolver::new(vec![
            ZoneRegion::new("Asia/Hong_Kong", (113.8, 114.5), (22.1, 22.6)),
            ZoneRegion::new("Asia/Taipei", (119.3, 122.1), (21.8, 25.4)),
            ZoneRegion::new("Asia/Shanghai", (73.0, 135.0), (18.0, 54.0)),
        ])
        .unwrap()
    }

    #[test]
    fn region_lookup_order() {
        let r = east_asia();
        assert_eq!(r.resolve(&loc(114.17, 22.32)).as_deref(), Some("Asia/Hong_Kong"));
        assert_eq!(r.resolve(&loc(113.02, 23.70)).as_deref(), Some("Asia/Shanghai"));
        assert_eq!(r.resolve(&loc(121.56, 25.04)).as_deref(), Some("Asia/Taipei"));
        assert_eq!(r.resolve(&loc(-150.0, 0.0)), None);
        assert_eq!(r.regions().len(), 3);
    }

    #[test]
    fn polygon_lookup_leaves_open_ocean_unresolved() {
        let r = PolygonResolver::new();
        assert_eq!(r.resolve(&loc(113.02, 23.70)).as_deref(), Some("Asia/Shanghai"));
        assert_eq!(r.resolve(&loc(-30.0, 0.0)), None);
        assert_eq!(r.resolve(&loc(-150.0, 0.0)), None);
    }

    #[test]
    fn rejects_bad_regions() {
        let bad = ZoneRegion::new("Asia/Tokyo", (140.0, 130.0), (30.0, 40.0));
        assert_eq!(
            RegionResolver::new(vec![bad]),
            Err(TimeError::InvalidRegion("Asia/Tokyo".into()))
        );
        let unknown = ZoneRegion::new("Mars/Olympus", (0.0, 1.0), (0.0, 1.0));
        assert!(matches!(
            RegionResolver::new(vec![unknown]),
            Err(TimeError::InvalidZoneId(_))
        ));
    }

    #[test]
    fn fixed_resolver() {
        let r = FixedZoneResolver::new("Europe/London").unwrap();
        assert_eq!(r.resolve(&loc(0.0, 0.0)).as_deref(), Some("Europe/London"));
        assert!(FixedZoneResolver::new("Nowhere/Special").is_err());
    }
}
