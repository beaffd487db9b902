//! Node-term (jie) boundaries and solar-term location.
//!
//! This crate provides:
//! - Apparent solar longitude from an abridged VSOP87 Earth theory
//! - Bisection search for the twelve node terms of a civil year
//! - [`locate_solar_term`]: bazi year, month branch and boundary deltas
//!   for an apparent solar time

pub mod error;
pub mod locator;
pub mod solar_term;
pub mod solar_term_types;
pub mod sun;
pub mod term_search;
mod vsop_earth;

pub use error::SearchError;
pub use locator::locate_solar_term;
pub use solar_term::{ALL_NODE_TERMS, NodeTerm};
pub use solar_term_types::{SolarTermBoundary, SolarTermConfig, SolarTermContext};
pub use sun::{nutation_longitude_deg, sun_apparent_longitude_deg, sun_apparent_longitude_ut};
pub use term_search::{SolarTermSource, VsopSolarTerms, node_term_jd_ut, node_term_time};
