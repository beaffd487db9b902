//! The twelve node terms (jie) that open each month branch.

use bazi_base::Branch;
use serde::Serialize;

/// A node term. Declaration order is civil-year order (Minor Cold first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NodeTerm {
    /// 小寒, 285°
    MinorCold,
    /// 立春, 315°
    StartOfSpring,
    /// 惊蛰, 345°
    AwakeningOfInsects,
    /// 清明, 15°
    PureBrightness,
    /// 立夏, 45°
    StartOfSummer,
    /// 芒种, 75°
    GrainInEar,
    /// 小暑, 105°
    MinorHeat,
    /// 立秋, 135°
    StartOfAutumn,
    /// 白露, 165°
    WhiteDew,
    /// 寒露, 195°
    ColdDew,
    /// 立冬, 225°
    StartOfWinter,
    /// 大雪, 255°
    MajorSnow,
}

/// All node terms in the order they fall within a civil year.
pub const ALL_NODE_TERMS: [NodeTerm; 12] = [
    NodeTerm::MinorCold,
    NodeTerm::StartOfSpring,
    NodeTerm::AwakeningOfInsects,
    NodeTerm::PureBrightness,
    NodeTerm::StartOfSummer,
    NodeTerm::GrainInEar,
    NodeTerm::MinorHeat,
    NodeTerm::StartOfAutumn,
    NodeTerm::WhiteDew,
    NodeTerm::ColdDew,
    NodeTerm::StartOfWinter,
    NodeTerm::MajorSnow,
];

impl NodeTerm {
    /// 0-based index in civil-year order.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::MinorCold => "小寒",
            Self::StartOfSpring => "立春",
            Self::AwakeningOfInsects => "惊蛰",
            Self::PureBrightness => "清明",
            Self::StartOfSummer => "立夏",
            Self::GrainInEar => "芒种",
            Self::MinorHeat => "小暑",
            Self::StartOfAutumn => "立秋",
            Self::WhiteDew => "白露",
            Self::ColdDew => "寒露",
            Self::StartOfWinter => "立冬",
            Self::MajorSnow => "大雪",
        }
    }

    /// Month branch the term opens: 立春 → 寅 ... 小寒 → 丑.
    pub const fn month_branch(self) -> Branch {
        Branch::from_index((self.index() + 1) % 12)
    }

    /// Apparent solar longitude at which the term begins.
    pub fn target_longitude_deg(self) -> f64 {
        (285.0 + 30.0 * f64::from(self.index())).rem_euclid(360.0)
    }

    /// Typical (month, day) of the term; used to bracket the search.
    pub const fn typical_date(self) -> (u32, u32) {
        match self {
            Self::MinorCold => (1, 6),
            Self::StartOfSpring => (2, 4),
            Self::AwakeningOfInsects => (3, 6),
            Self::PureBrightness => (4, 5),
            Self::StartOfSummer => (5, 6),
            Self::GrainInEar => (6, 6),
            Self::MinorHeat => (7, 7),
            Self::StartOfAutumn => (8, 8),
            Self::WhiteDew => (9, 8),
            Self::ColdDew => (10, 8),
            Self::StartOfWinter => (11, 7),
            Self::MajorSnow => (12, 7),
        }
    }
}

impl std::fmt::Display for NodeTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
