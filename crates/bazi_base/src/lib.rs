//! Static reference tables for four-pillar charts.
//!
//! This crate provides:
//! - Heavenly stems, earthly branches, elements and polarity
//! - The sexagenary cycle and its nayin labels
//! - Hidden stems, commanding-stem sub-periods and ten-god classification
//! - Seasons, seasonal strength and life-cycle stages
//! - Branch relation tables (clash, combination, harmony, punishment, harm)
//!
//! Every table is `const` data; lookups are pure functions.

pub mod branch;
pub mod commanding;
pub mod element;
pub mod error;
pub mod ganzhi;
pub mod life_stage;
pub mod nayin;
pub mod relation;
pub mod season;
pub mod stem;
pub mod ten_god;

pub use branch::{ALL_BRANCHES, Branch, NODE_ORDER};
pub use commanding::{CommandingStem, SubPeriod, commanding_stem, sub_periods};
pub use element::{ALL_ELEMENTS, Element, Gender, Polarity};
pub use error::BaseError;
pub use ganzhi::{CYCLE_EPOCH_YEAR, GanZhi, sixty_cycle};
pub use life_stage::{ALL_LIFE_STAGES, LifeStage, life_stage};
pub use nayin::Nayin;
pub use relation::PunishmentKind;
pub use season::{Season, Strength, seasonal_strength};
pub use stem::{ALL_STEMS, Stem};
pub use ten_god::{TenGod, ten_god};
