//! ΔT = TT − UT, from the Espenak–Meeus polynomial expressions.
//!
//! Valid to a few seconds over 1800–2050; outside that range the long-term
//! parabola `−20 + 32·u²` is used.

use crate::julian::J2000_JD;

/// Decimal year of a Julian Date (Julian-year approximation).
pub fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000_JD) / 365.25
}

/// ΔT in seconds for a decimal year.
pub fn delta_t_seconds(year: f64) -> f64 {
    let y = year;
    if y < 1800.0 {
        long_term(y)
    } else if y < 1860.0 {
        let t = y - 1800.0;
        13.72 - 0.332447 * t + 0.0068612 * t.powi(2) + 0.0041116 * t.powi(3)
            - 0.00037436 * t.powi(4)
            + 0.0000121272 * t.powi(5)
            - 0.0000001699 * t.powi(6)
            + 0.000000000875 * t.powi(7)
    } else if y < 1900.0 {
        let t = y - 1860.0;
        7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
            - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233_174.0
    } else if y < 1920.0 {
        let t = y - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
            - 0.000197 * t.powi(4)
    } else if y < 1941.0 {
        let t = y - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
    } else if y < 1961.0 {
        let t = y - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if y < 1986.0 {
        let t = y - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if y < 2005.0 {
        let t = y - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if y < 2050.0 {
        let t = y - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t.powi(2)
    } else if y < 2150.0 {
        long_term(y) - 0.5628 * (2150.0 - y)
    } else {
        long_term(y)
    }
}

fn long_term(y: f64) -> f64 {
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// ΔT in days for a UT Julian Date.
pub fn delta_t_days(jd_ut: f64) -> f64 {
    delta_t_seconds(decimal_year(jd_ut)) / crate::julian::SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modern_values() {
        // Observed 2020.0 was 69.4 s; the 2005–2050 polynomial runs ~2 s high
        assert!((delta_t_seconds(1984.0) - 53.8).abs() < 1.0);
        assert!((delta_t_seconds(2000.0) - 63.86).abs() < 0.1);
        assert!((delta_t_seconds(2020.0) - 71.6).abs() < 2.5);
    }

    #[test]
    fn early_twentieth_century() {
        assert!((delta_t_seconds(1900.0) + 2.79).abs() < 1e-9);
        assert!((delta_t_seconds(1930.0) - 24.0).abs() < 1.5);
    }

    #[test]
    fn segments_join_smoothly() {
        for boundary in [1860.0, 1900.0, 1920.0, 1941.0, 1961.0, 1986.0, 2005.0, 2050.0] {
            let jump = delta_t_seconds(boundary) - delta_t_seconds(boundary - 1e-6);
            assert!(jump.abs() < 2.0, "jump {jump} at {boundary}");
        }
    }
}
