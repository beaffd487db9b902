//! Equation of time (apparent minus mean solar time).
//!
//! Uses the three-term trigonometric approximation
//! `9.87·sin 2B − 7.53·cos B − 1.5·sin B`, `B = 2π(N − 81)/365`.
//! Error against the full solar theory stays within about ±1 minute,
//! which is below the resolution of a two-hour chart bucket but not
//! fine enough to trust near a bucket edge.

use std::f64::consts::TAU;

/// Equation of time in minutes for a 1-based day of year.
pub fn equation_of_time_minutes(day_of_year: u32) -> f64 {
    let b = TAU * (f64::from(day_of_year) - 81.0) / 365.0;
    9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn early_february_minimum() {
        // 1984-02-04 is day 35
        assert!((equation_of_time_minutes(35) + 14.09).abs() < 0.01);
    }

    #[test]
    fn early_november_maximum() {
        let max = (1..=366).map(equation_of_time_minutes).fold(f64::MIN, f64::max);
        assert!((15.0..17.5).contains(&max));
        assert!(equation_of_time_minutes(307) > 16.0);
    }

    #[test]
    fn bounded() {
        for n in 1..=366 {
            assert!(equation_of_time_minutes(n).abs() < 17.5);
        }
    }
}
