//! Four-pillar chart construction and interpretation data.
//!
//! This crate provides:
//! - Two-phase chart construction ([`build_partial`], [`finalize`],
//!   [`build_chart`]) with a pluggable [`DayPillarSource`]
//! - Branch and pillar relation detection within a chart and across periods
//! - Major-period timeline and annual-period queries
//! - Derived chart features (ten gods, element tally, roots, flags)

pub mod analysis;
pub mod builder;
pub mod day_pillar;
pub mod error;
pub mod interaction;
pub mod pillar;
pub mod rules;
pub mod timeline;

pub use analysis::{ChartAnalysis, StemSlot, TenGodMap, analyze_chart};
pub use builder::{
    CommandingStemInfo, FourPillarChart, MonthPillar, PartialChart, build_chart, build_partial,
    finalize,
};
pub use day_pillar::{DayPillarSource, JulianDayCycle};
pub use error::ChartError;
pub use interaction::{
    BranchAt, DetectOptions, PillarAt, RelationAnnotation, RelationKind, Severity,
    detect_branch_relations, detect_cross, detect_interactions,
};
pub use pillar::{CHART_POSITIONS, Pillar, PillarPosition};
pub use timeline::{
    AnnualAnalysis, AnnualOutcome, AnnualPeriod, Direction, MajorPeriod, Timeline,
    generate_timeline, onset_age, query_annual,
};
