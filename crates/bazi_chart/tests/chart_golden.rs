//! End-to-end chart, timeline and annual checks on the Guangdong 1984
//! example (apparent solar time 1984-02-04 09:17:59).

use bazi_base::{Branch, GanZhi, Gender};
use bazi_chart::{
    AnnualOutcome, DetectOptions, Direction, FourPillarChart, JulianDayCycle, PillarPosition,
    RelationKind, build_chart, detect_interactions, generate_timeline, query_annual,
};
use bazi_search::{NodeTerm, SolarTermContext, VsopSolarTerms, locate_solar_term};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use proptest::prelude::*;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn example() -> (SolarTermContext, FourPillarChart) {
    let apparent = at(1984, 2, 4, 9, 17, 59);
    let ctx = locate_solar_term(apparent, &VsopSolarTerms::default()).unwrap();
    let chart = build_chart(&ctx, apparent, &JulianDayCycle).unwrap();
    (ctx, chart)
}

fn kinds(rel: &[bazi_chart::RelationAnnotation]) -> Vec<RelationKind> {
    rel.iter().map(|r| r.kind()).collect()
}

#[test]
fn example_pillars() {
    let (_, chart) = example();
    assert_eq!(chart.to_string(), "癸亥 乙丑 戊辰 丁巳");
    assert_eq!(chart.bazi_year(), 1983);
    assert_eq!(chart.year().nayin.name(), "大海水");
}

#[test]
fn example_internal_relations() {
    let (_, chart) = example();
    let rel = detect_interactions(&chart, &DetectOptions::default());
    assert_eq!(kinds(&rel), vec![RelationKind::Clash]);
    assert_eq!(
        rel[0].positions(),
        vec![PillarPosition::Year, PillarPosition::Hour]
    );
}

#[test]
fn male_timeline_runs_reverse() {
    let (ctx, chart) = example();
    let tl = generate_timeline(&chart, &ctx, Gender::Male);
    assert_eq!(tl.direction, Direction::Reverse);
    assert_eq!(tl.target.term, NodeTerm::MinorCold);
    assert_eq!(tl.onset_age, 10);
    assert_eq!(tl.periods.len(), 8);
    assert_eq!(tl.periods[0].pillar.to_string(), "甲子");
    assert_eq!((tl.periods[0].start_age, tl.periods[0].end_age), (10, 19));
    assert_eq!(tl.periods[7].pillar.to_string(), "丁巳");
    assert_eq!((tl.periods[7].start_age, tl.periods[7].end_age), (80, 89));
    // 28.9 counted days ≈ 9.6 years after birth
    assert_eq!(tl.onset_instant.year(), 1993);
}

#[test]
fn female_timeline_runs_forward_with_minimum_onset() {
    let (ctx, chart) = example();
    let tl = generate_timeline(&chart, &ctx, Gender::Female);
    assert_eq!(tl.direction, Direction::Forward);
    assert_eq!(tl.target.term, NodeTerm::StartOfSpring);
    // 0.58 days rounds to 0 years, lifted to 1
    assert_eq!(tl.onset_age, 1);
    assert_eq!(tl.periods[0].pillar.to_string(), "丙寅");
    assert_eq!((tl.periods[0].start_age, tl.periods[0].end_age), (1, 10));
}

#[test]
fn annual_lookup_boundaries() {
    let (ctx, chart) = example();
    let tl = generate_timeline(&chart, &ctx, Gender::Male);

    let index_for = |year: i32| match query_annual(&chart, &tl, year) {
        AnnualOutcome::Found(a) => Some(a.major_period.index),
        AnnualOutcome::NotFound { .. } => None,
    };
    assert_eq!(index_for(1992), None);
    assert_eq!(index_for(1993), Some(1));
    assert_eq!(index_for(2002), Some(1));
    assert_eq!(index_for(2003), Some(2));
    assert_eq!(index_for(2072), Some(8));
    assert_eq!(index_for(2073), None);
}

#[test]
fn annual_2024_combines_with_major_period() {
    let (ctx, chart) = example();
    let tl = generate_timeline(&chart, &ctx, Gender::Male);
    let outcome = query_annual(&chart, &tl, 2024);
    let analysis = outcome.analysis().unwrap();
    assert_eq!(analysis.annual.pillar.to_string(), "甲辰");
    assert_eq!(analysis.age, 41);
    assert_eq!(analysis.major_period.pillar.to_string(), "辛酉");
    assert!(analysis.against_chart.is_empty());
    assert_eq!(
        kinds(&analysis.against_major_period),
        vec![RelationKind::Combination]
    );
}

#[test]
fn annual_2043_exact_match_and_compound_clash() {
    let (ctx, chart) = example();
    let tl = generate_timeline(&chart, &ctx, Gender::Male);
    let outcome = query_annual(&chart, &tl, 2043);
    let analysis = outcome.analysis().unwrap();
    assert_eq!(analysis.annual.pillar.to_string(), "癸亥");
    assert_eq!(
        kinds(&analysis.against_chart),
        vec![
            RelationKind::ExactMatch,
            RelationKind::Clash,
            RelationKind::CompoundClash
        ]
    );
    assert!(analysis.against_major_period.is_empty());
}

#[test]
fn not_found_keeps_the_annual_pillar() {
    let (ctx, chart) = example();
    let tl = generate_timeline(&chart, &ctx, Gender::Male);
    match query_annual(&chart, &tl, 1990) {
        AnnualOutcome::NotFound { annual, age } => {
            assert_eq!(annual.pillar, GanZhi::for_year(1990));
            assert_eq!(age, 7);
        }
        AnnualOutcome::Found(a) => panic!("unexpected period {}", a.major_period.index),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn chart_agrees_with_context(
        year in 1950i32..2050,
        ordinal in 1u32..=365,
        minute_of_day in 0u32..1440,
        male in any::<bool>(),
    ) {
        let date = NaiveDate::from_yo_opt(year, ordinal).unwrap();
        let apparent = date.and_hms_opt(minute_of_day / 60, minute_of_day % 60, 0).unwrap();
        let ctx = locate_solar_term(apparent, &VsopSolarTerms::default()).unwrap();
        let chart = build_chart(&ctx, apparent, &JulianDayCycle).unwrap();

        prop_assert_eq!(chart.year().ganzhi, GanZhi::for_year(ctx.bazi_year));
        prop_assert_eq!(chart.month().pillar.branch(), ctx.month_branch);
        prop_assert_eq!(chart.hour().branch(), Branch::from_hour(apparent.hour()));

        let gender = if male { Gender::Male } else { Gender::Female };
        let tl = generate_timeline(&chart, &ctx, gender);
        prop_assert!(tl.onset_age >= 1);
        for pair in tl.periods.windows(2) {
            prop_assert_eq!(pair[1].start_age, pair[0].end_age + 1);
            prop_assert_eq!(pair[1].pillar, pair[0].pillar.offset(tl.direction.step()));
        }
    }
}
