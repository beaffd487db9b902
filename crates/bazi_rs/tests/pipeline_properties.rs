//! Property tests over random births across eastern Asia.

use bazi_rs::{BaziEngine, BirthMoment, Branch, Gender, GeoLocation, SpecialHour};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn pillars_follow_the_normalized_time(
        year in 1960i32..2040,
        ordinal in 1u32..=365,
        minute_of_day in 0u32..1440,
        lon in 100.0f64..122.0,
        lat in 22.0f64..40.0,
    ) {
        let engine = BaziEngine::default();
        let birth = BirthMoment::new(
            NaiveDate::from_yo_opt(year, ordinal).unwrap(),
            NaiveTime::from_hms_opt(minute_of_day / 60, minute_of_day % 60, 0).unwrap(),
            GeoLocation::new(lon, lat).unwrap(),
            Gender::Male,
        );
        let report = engine.compute(&birth).unwrap();
        let time = report.time.time();
        let chart_time = time.chart_time();

        prop_assert_eq!(report.chart.hour().branch(), Branch::from_hour(chart_time.hour()));
        prop_assert_eq!(report.chart.month().pillar.branch(), report.solar_terms.month_branch);
        if time.special_hour == SpecialHour::LateZi {
            prop_assert_eq!(chart_time.date(), time.apparent.date().succ_opt().unwrap());
        } else {
            prop_assert_eq!(chart_time, time.apparent);
        }
        // The bazi year lags the civil year only before Start of Spring.
        let lag = time.apparent.year() - report.solar_terms.bazi_year;
        prop_assert!(lag == 0 || lag == 1);
        prop_assert_eq!(lag == 0, report.solar_terms.is_after_start_of_spring);
        prop_assert!(report.timeline.onset_age >= 1);
    }
}
