//! Types for node-term search and location.

use bazi_base::Branch;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::solar_term::NodeTerm;

/// Configuration for the node-term search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarTermConfig {
    /// Civil offset from UTC, in minutes, in which boundary timestamps are
    /// expressed (default 480, the UTC+08:00 almanac meridian).
    pub reference_offset_minutes: i32,
    /// Half-width of the bisection bracket around the typical date, in days.
    pub bracket_days: f64,
    /// Maximum bisection iterations (default 60).
    pub max_iterations: u32,
    /// Convergence threshold in days (default 1e-6, ~0.09 s).
    pub convergence_days: f64,
}

impl Default for SolarTermConfig {
    fn default() -> Self {
        Self {
            reference_offset_minutes: 480,
            bracket_days: 20.0,
            max_iterations: 60,
            convergence_days: 1e-6,
        }
    }
}

impl SolarTermConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.reference_offset_minutes.abs() > 14 * 60 {
            return Err("reference_offset_minutes must be within ±14 hours");
        }
        if !self.bracket_days.is_finite() || self.bracket_days <= 0.0 || self.bracket_days > 30.0 {
            return Err("bracket_days must be in (0, 30]");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.convergence_days.is_finite() || self.convergence_days <= 0.0 {
            return Err("convergence_days must be positive");
        }
        Ok(())
    }
}

/// One node-term boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarTermBoundary {
    pub term: NodeTerm,
    /// Moment of the term in the reference civil offset.
    pub timestamp: NaiveDateTime,
    /// Month branch that begins at this boundary.
    pub month_branch: Branch,
    /// Civil year whose term table produced the boundary.
    pub civil_year: i32,
}

impl SolarTermBoundary {
    pub fn new(term: NodeTerm, timestamp: NaiveDateTime, civil_year: i32) -> Self {
        Self {
            term,
            timestamp,
            month_branch: term.month_branch(),
            civil_year,
        }
    }
}

/// Where an apparent solar time falls among the node terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarTermContext {
    /// The located apparent solar time (never the late-zi shifted one).
    pub apparent: NaiveDateTime,
    /// Year used for the year pillar; changes at Start of Spring.
    pub bazi_year: i32,
    pub month_branch: Branch,
    /// Whether the apparent time is at or after Start of Spring of its
    /// civil year.
    pub is_after_start_of_spring: bool,
    /// Start of Spring of [`Self::bazi_year`].
    pub start_of_spring: SolarTermBoundary,
    /// Lower boundary of the enclosing interval (inclusive).
    pub previous: SolarTermBoundary,
    /// Upper boundary of the enclosing interval (exclusive).
    pub next: SolarTermBoundary,
    pub days_since_previous: f64,
    pub days_to_next: f64,
}
