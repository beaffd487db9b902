//! Node-term search: when the apparent solar longitude reaches each term's
//! target.
//!
//! Algorithm: bisection on f(t) = normalize(λ☉(t) − target) inside a bracket
//! around the term's typical civil date. The Sun's longitude increases
//! monotonically, so one sign change from negative to positive exists
//! within ±20 days of the typical date.

use bazi_time::{calendar_to_jd, jd_to_naive};
use chrono::{NaiveDateTime, TimeDelta};
use tracing::debug;

use crate::error::SearchError;
use crate::solar_term::{ALL_NODE_TERMS, NodeTerm};
use crate::solar_term_types::{SolarTermBoundary, SolarTermConfig};
use crate::sun::sun_apparent_longitude_ut;

/// Source of node-term boundaries for a civil year.
pub trait SolarTermSource: Send + Sync {
    /// The twelve node boundaries of `year` in time order (Minor Cold first),
    /// timestamps in the source's reference civil offset.
    fn node_boundaries(&self, year: i32) -> Result<Vec<SolarTermBoundary>, SearchError>;
}

/// Boundaries computed from the VSOP87 solar theory.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VsopSolarTerms {
    config: SolarTermConfig,
}

impl VsopSolarTerms {
    pub fn new(config: SolarTermConfig) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolarTermConfig {
        &self.config
    }
}

impl SolarTermSource for VsopSolarTerms {
    fn node_boundaries(&self, year: i32) -> Result<Vec<SolarTermBoundary>, SearchError> {
        ALL_NODE_TERMS
            .iter()
            .map(|&term| {
                let timestamp = node_term_time(term, year, &self.config)?;
                Ok(SolarTermBoundary::new(term, timestamp, year))
            })
            .collect()
    }
}

/// Normalize an angle to (-180, +180].
pub(crate) fn normalize_to_pm180(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Julian Date (UT) at which `term` of civil `year` begins.
pub fn node_term_jd_ut(term: NodeTerm, year: i32, config: &SolarTermConfig) -> Result<f64, SearchError> {
    let (month, day) = term.typical_date();
    let guess = calendar_to_jd(year, month, f64::from(day));
    let target = term.target_longitude_deg();
    let f = |jd: f64| normalize_to_pm180(sun_apparent_longitude_ut(jd) - target);

    let mut t_a = guess - config.bracket_days;
    let mut t_b = guess + config.bracket_days;
    let mut f_a = f(t_a);
    let f_b = f(t_b);
    if !(f_a <= 0.0 && f_b >= 0.0) {
        return Err(SearchError::NoConvergence { term, year });
    }

    for _ in 0..config.max_iterations {
        let t_mid = 0.5 * (t_a + t_b);
        let f_mid = f(t_mid);
        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }
        if (t_b - t_a).abs() < config.convergence_days {
            break;
        }
    }

    Ok(0.5 * (t_a + t_b))
}

/// Moment of `term` in civil `year`, in the configured reference offset.
pub fn node_term_time(
    term: NodeTerm,
    year: i32,
    config: &SolarTermConfig,
) -> Result<NaiveDateTime, SearchError> {
    let jd = node_term_jd_ut(term, year, config)?;
    let utc = jd_to_naive(jd).ok_or(SearchError::NoConvergence { term, year })?;
    let local = utc
        .checked_add_signed(TimeDelta::minutes(i64::from(config.reference_offset_minutes)))
        .ok_or(SearchError::NoConvergence { term, year })?;
    debug!(%term, year, %local, "node term");
    Ok(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn assert_close(got: NaiveDateTime, want: NaiveDateTime, tol_s: i64) {
        let diff = (got - want).num_seconds().abs();
        assert!(diff <= tol_s, "got {got}, want {want} (Δ {diff}s)");
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_to_pm180(190.0), -170.0);
        assert_eq!(normalize_to_pm180(-190.0), 170.0);
        assert_eq!(normalize_to_pm180(180.0), 180.0);
    }

    #[test]
    fn start_of_spring_1984() {
        let c = SolarTermConfig::default();
        let t = node_term_time(NodeTerm::StartOfSpring, 1984, &c).unwrap();
        assert_close(t, at(1984, 2, 4, 23, 18, 44), 60);
    }

    #[test]
    fn minor_cold_1984() {
        let c = SolarTermConfig::default();
        let t = node_term_time(NodeTerm::MinorCold, 1984, &c).unwrap();
        assert_close(t, at(1984, 1, 6, 11, 40, 51), 60);
    }

    #[test]
    fn reference_offset_shifts_timestamps() {
        let utc = SolarTermConfig {
            reference_offset_minutes: 0,
            ..SolarTermConfig::default()
        };
        let cst = SolarTermConfig::default();
        let a = node_term_time(NodeTerm::StartOfSpring, 2000, &utc).unwrap();
        let b = node_term_time(NodeTerm::StartOfSpring, 2000, &cst).unwrap();
        assert_eq!((b - a).num_minutes(), 480);
    }

    #[test]
    fn boundaries_sorted_within_year() {
        let src = VsopSolarTerms::default();
        let b = src.node_boundaries(1990).unwrap();
        assert_eq!(b.len(), 12);
        assert!(b.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert!(b.iter().all(|x| x.civil_year == 1990));
    }

    #[test]
    fn invalid_config_rejected() {
        let c = SolarTermConfig {
            bracket_days: 0.0,
            ..SolarTermConfig::default()
        };
        assert!(matches!(VsopSolarTerms::new(c), Err(SearchError::InvalidConfig(_))));
    }
}
