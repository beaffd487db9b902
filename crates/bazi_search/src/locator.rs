//! Locate an apparent solar time among the node-term boundaries.

use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use crate::error::SearchError;
use crate::solar_term::NodeTerm;
use crate::solar_term_types::{SolarTermBoundary, SolarTermContext};
use crate::term_search::SolarTermSource;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Find the node-term interval `[previous, next)` that contains `apparent`.
///
/// `apparent` must be the unshifted apparent solar time. Boundaries for the
/// civil year and its neighbours form a 36-entry window. The bazi year is
/// the civil year, less one while `apparent` precedes that civil year's
/// Start of Spring.
pub fn locate_solar_term<S>(apparent: NaiveDateTime, source: &S) -> Result<SolarTermContext, SearchError>
where
    S: SolarTermSource + ?Sized,
{
    let year = apparent.year();
    let mut window = Vec::with_capacity(36);
    for y in year - 1..=year + 1 {
        window.extend(source.node_boundaries(y)?);
    }
    window.sort_by_key(|b| b.timestamp);

    let (previous, next) = window
        .windows(2)
        .find(|w| w[0].timestamp <= apparent && apparent < w[1].timestamp)
        .map(|w| (w[0], w[1]))
        .ok_or(SearchError::BoundaryNotFound(apparent))?;

    let civil_spring = start_of_spring(&window, year).ok_or(SearchError::BoundaryNotFound(apparent))?;
    let is_after_start_of_spring = apparent >= civil_spring.timestamp;
    let bazi_year = if is_after_start_of_spring { year } else { year - 1 };
    let start_of_spring =
        start_of_spring(&window, bazi_year).ok_or(SearchError::BoundaryNotFound(apparent))?;

    let ctx = SolarTermContext {
        apparent,
        bazi_year,
        month_branch: previous.month_branch,
        is_after_start_of_spring,
        start_of_spring,
        previous,
        next,
        days_since_previous: days_between(previous.timestamp, apparent),
        days_to_next: days_between(apparent, next.timestamp),
    };
    debug!(
        %apparent,
        bazi_year,
        month = %ctx.month_branch,
        previous = %previous.term,
        next = %next.term,
        "located node term"
    );
    Ok(ctx)
}

fn start_of_spring(window: &[SolarTermBoundary], year: i32) -> Option<SolarTermBoundary> {
    window
        .iter()
        .find(|b| b.term == NodeTerm::StartOfSpring && b.civil_year == year)
        .copied()
}

fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar_term::ALL_NODE_TERMS;
    use bazi_base::Branch;
    use chrono::NaiveDate;

    /// Every term at noon on its typical date.
    struct TypicalDates;

    impl SolarTermSource for TypicalDates {
        fn node_boundaries(&self, year: i32) -> Result<Vec<SolarTermBoundary>, SearchError> {
            Ok(ALL_NODE_TERMS
                .iter()
                .map(|&t| {
                    let (m, d) = t.typical_date();
                    let ts = NaiveDate::from_ymd_opt(year, m, d)
                        .unwrap()
                        .and_hms_opt(12, 0, 0)
                        .unwrap();
                    SolarTermBoundary::new(t, ts, year)
                })
                .collect())
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn before_start_of_spring_is_previous_year() {
        let ctx = locate_solar_term(at(2010, 2, 3, 12), &TypicalDates).unwrap();
        assert_eq!(ctx.bazi_year, 2009);
        assert_eq!(ctx.month_branch, Branch::Chou);
        assert!(!ctx.is_after_start_of_spring);
        assert_eq!(ctx.previous.term, NodeTerm::MinorCold);
        assert_eq!(ctx.next.term, NodeTerm::StartOfSpring);
        assert_eq!(ctx.start_of_spring.civil_year, 2009);
        assert!((ctx.days_since_previous - 28.0).abs() < 1e-9);
        assert!((ctx.days_to_next - 1.0).abs() < 1e-9);
    }

    #[test]
    fn boundary_instant_belongs_to_new_interval() {
        let ctx = locate_solar_term(at(2010, 2, 4, 12), &TypicalDates).unwrap();
        assert_eq!(ctx.bazi_year, 2010);
        assert_eq!(ctx.month_branch, Branch::Yin);
        assert!(ctx.is_after_start_of_spring);
        assert_eq!(ctx.days_since_previous, 0.0);
    }

    #[test]
    fn early_january_before_minor_cold() {
        let ctx = locate_solar_term(at(2010, 1, 2, 0), &TypicalDates).unwrap();
        assert_eq!(ctx.previous.term, NodeTerm::MajorSnow);
        assert_eq!(ctx.previous.civil_year, 2009);
        assert_eq!(ctx.month_branch, Branch::Zi);
        assert_eq!(ctx.bazi_year, 2009);
        assert!(!ctx.is_after_start_of_spring);
    }

    #[test]
    fn late_december() {
        let ctx = locate_solar_term(at(2010, 12, 31, 0), &TypicalDates).unwrap();
        assert_eq!(ctx.month_branch, Branch::Zi);
        assert_eq!(ctx.bazi_year, 2010);
        assert_eq!(ctx.next.term, NodeTerm::MinorCold);
        assert_eq!(ctx.next.civil_year, 2011);
    }

    struct Empty;

    impl SolarTermSource for Empty {
        fn node_boundaries(&self, _: i32) -> Result<Vec<SolarTermBoundary>, SearchError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn empty_source_reports_boundary_not_found() {
        let t = at(2010, 6, 1, 0);
        assert_eq!(
            locate_solar_term(t, &Empty),
            Err(SearchError::BoundaryNotFound(t))
        );
    }
}
