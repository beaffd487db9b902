//! Apparent geocentric longitude of the Sun.
//!
//! Geometric longitude from the VSOP87 Earth series (+180°), reduced to the
//! FK5 system, then corrected for nutation in longitude and aberration
//! (Meeus, ch. 25 high-accuracy method).

use bazi_time::{J2000_JD, delta_t_days};

use crate::vsop_earth::earth_longitude_radius;

/// Julian days per millennium.
const DAYS_PER_MILLENNIUM: f64 = 365_250.0;

/// FK5 frame correction in degrees (−0.09033″).
const FK5_CORRECTION_DEG: f64 = -0.09033 / 3600.0;

/// Aberration constant in arcseconds for R = 1 AU.
const ABERRATION_ARCSEC: f64 = 20.4898;

/// Nutation in longitude Δψ in degrees, four-term series (accurate to ~0.5″).
pub fn nutation_longitude_deg(jd_tt: f64) -> f64 {
    let t = (jd_tt - J2000_JD) / 36_525.0;
    let omega = (125.04452 - 1934.136261 * t).to_radians();
    let sun_mean = (280.4665 + 36_000.7698 * t).to_radians();
    let moon_mean = (218.3165 + 481_267.8813 * t).to_radians();
    let arcsec = -17.20 * omega.sin() - 1.32 * (2.0 * sun_mean).sin()
        - 0.23 * (2.0 * moon_mean).sin()
        + 0.21 * (2.0 * omega).sin();
    arcsec / 3600.0
}

/// Apparent geocentric ecliptic longitude of the Sun in [0, 360) degrees,
/// for a Julian Date on the TT scale.
pub fn sun_apparent_longitude_deg(jd_tt: f64) -> f64 {
    let tau = (jd_tt - J2000_JD) / DAYS_PER_MILLENNIUM;
    let (l_rad, r_au) = earth_longitude_radius(tau);
    let geometric = l_rad.to_degrees() + 180.0 + FK5_CORRECTION_DEG;
    let aberration = -ABERRATION_ARCSEC / 3600.0 / r_au;
    (geometric + nutation_longitude_deg(jd_tt) + aberration).rem_euclid(360.0)
}

/// Same as [`sun_apparent_longitude_deg`] for a Julian Date in UT.
pub fn sun_apparent_longitude_ut(jd_ut: f64) -> f64 {
    sun_apparent_longitude_deg(jd_ut + delta_t_days(jd_ut))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_25b() {
        // 1992-10-13 0h TD: apparent λ = 199°.90599 (high-accuracy method)
        let lon = sun_apparent_longitude_deg(2_448_908.5);
        assert!((lon - 199.90599).abs() < 3e-4, "λ = {lon}");
    }

    #[test]
    fn longitude_in_range() {
        for i in 0..400 {
            let lon = sun_apparent_longitude_deg(J2000_JD + f64::from(i) * 1.0);
            assert!((0.0..360.0).contains(&lon));
        }
    }

    #[test]
    fn moves_about_one_degree_per_day() {
        let a = sun_apparent_longitude_deg(J2000_JD);
        let b = sun_apparent_longitude_deg(J2000_JD + 1.0);
        let step = (b - a).rem_euclid(360.0);
        assert!((0.95..1.03).contains(&step), "step {step}");
    }
}
