//! Convenience facade for the bazi four-pillar chart engine.
//!
//! Wires the time, solar-term and chart crates into one pipeline:
//! civil birth time → apparent solar time → node-term context → four
//! pillars → relations, analysis and major periods.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use bazi_rs::*;
//!
//! let engine = BaziEngine::default();
//! let location = GeoLocation::new(113.02, 23.70)?;
//! let date = chrono::NaiveDate::from_ymd_opt(1984, 2, 4).unwrap();
//! let time = chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap();
//! let report = engine.compute(&BirthMoment::new(date, time, location, Gender::Male))?;
//! println!("{}", report.chart); // 癸亥 乙丑 戊辰 丁巳
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;

pub use config::{BaziConfig, TimezoneConfig};
pub use engine::{BaziEngine, BaziReport};
pub use error::BaziError;

pub use bazi_base::{Branch, Element, GanZhi, Gender, Stem, TenGod};
pub use bazi_chart::{
    AnnualAnalysis, AnnualOutcome, ChartAnalysis, DayPillarSource, DetectOptions, Direction,
    FourPillarChart, JulianDayCycle, MajorPeriod, Pillar, PillarPosition, RelationAnnotation,
    RelationKind, Severity, Timeline,
};
pub use bazi_search::{NodeTerm, SolarTermConfig, SolarTermContext, SolarTermSource, VsopSolarTerms};
pub use bazi_time::{
    BirthMoment, DegradedReason, FixedZoneResolver, GeoLocation, PolygonResolver, RegionResolver,
    SpecialHour, TimeResolution, TimezoneResolver, ZoneRegion,
};
