//! Coordinate → zone lookups for cities near zone borders.

use bazi_time::{GeoLocation, PolygonResolver, TimeResolution, TimezoneResolver, resolve_time};
use chrono::{NaiveDate, NaiveTime, Offset, TimeZone, Timelike};
use chrono_tz::Tz;

fn zone_at(resolver: &PolygonResolver, lon: f64, lat: f64) -> Option<String> {
    resolver.resolve(&GeoLocation::new(lon, lat).unwrap())
}

/// Standard UTC offset of `zone` in hours on 2020-01-15.
fn winter_offset_hours(zone: &str) -> i32 {
    let tz: Tz = zone.parse().unwrap();
    let dt = tz.with_ymd_and_hms(2020, 1, 15, 12, 0, 0).unwrap();
    dt.offset().fix().local_minus_utc() / 3600
}

#[test]
fn northeast_china_is_shanghai() {
    let r = PolygonResolver::new();
    for (city, lon, lat) in [
        ("Shenyang", 123.43, 41.80),
        ("Changchun", 125.32, 43.88),
        ("Harbin", 126.63, 45.75),
    ] {
        assert_eq!(zone_at(&r, lon, lat).as_deref(), Some("Asia/Shanghai"), "{city}");
    }
}

#[test]
fn hanoi_is_utc_plus_seven() {
    let r = PolygonResolver::new();
    let zone = zone_at(&r, 105.85, 21.03).unwrap();
    assert_ne!(zone, "Asia/Shanghai");
    assert_eq!(winter_offset_hours(&zone), 7, "{zone}");
}

#[test]
fn vladivostok_is_not_tokyo() {
    let r = PolygonResolver::new();
    let zone = zone_at(&r, 131.89, 43.12).unwrap();
    assert_eq!(zone, "Asia/Vladivostok");
    assert_eq!(winter_offset_hours(&zone), 10);
}

#[test]
fn east_asian_capitals() {
    let r = PolygonResolver::new();
    assert_eq!(zone_at(&r, 139.69, 35.69).as_deref(), Some("Asia/Tokyo"));
    assert_eq!(zone_at(&r, 126.98, 37.57).as_deref(), Some("Asia/Seoul"));
    assert_eq!(zone_at(&r, 121.56, 25.04).as_deref(), Some("Asia/Taipei"));
    assert_eq!(zone_at(&r, 114.17, 22.32).as_deref(), Some("Asia/Hong_Kong"));
}

#[test]
fn shenyang_1990_uses_china_standard_time() {
    let loc = GeoLocation::new(123.43, 41.80).unwrap();
    let r = resolve_time(
        NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
        NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
        &loc,
        &PolygonResolver::new(),
    )
    .unwrap();
    assert!(matches!(r, TimeResolution::Resolved(_)));
    let t = r.time();
    assert_eq!(t.zone_id, "Asia/Shanghai");
    assert_eq!((t.utc.hour(), t.utc.minute()), (3, 30));
    // 03:30 + 493.72 min − ~9.5 min ≈ 11:34
    assert_eq!(t.apparent.hour(), 11);
    assert!((30..=38).contains(&t.apparent.minute()), "{}", t.apparent);
}
