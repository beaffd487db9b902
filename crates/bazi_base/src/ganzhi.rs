//! Sexagenary (60) cycle of stem-branch pairs.
//!
//! Position `i` pairs stem `i mod 10` with branch `i mod 12`, so only pairs
//! of matching polarity occur. The year epoch is CE 1984 = 甲子 (index 0).

use serde::Serialize;

use crate::branch::Branch;
use crate::nayin::Nayin;
use crate::stem::Stem;

/// Reference year at cycle position 0 (甲子).
pub const CYCLE_EPOCH_YEAR: i32 = 1984;

/// A stem-branch pair from the sexagenary cycle.
///
/// Construction guarantees that stem and branch polarity match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GanZhi {
    stem: Stem,
    branch: Branch,
}

impl GanZhi {
    /// Pair a stem and branch; `None` when their polarities differ.
    pub fn new(stem: Stem, branch: Branch) -> Option<Self> {
        (stem.polarity() == branch.polarity()).then_some(Self { stem, branch })
    }

    /// Pair at a 0-based cycle position; wraps modulo 60.
    pub const fn from_cycle_index(index: u8) -> Self {
        let i = index % 60;
        Self {
            stem: Stem::from_index(i % 10),
            branch: Branch::from_index(i % 12),
        }
    }

    /// 0-based cycle position (甲子 = 0 .. 癸亥 = 59).
    pub const fn cycle_index(self) -> u8 {
        // Chinese remainder: i ≡ s (mod 10), i ≡ b (mod 12)
        let s = self.stem.index() as i32;
        let b = self.branch.index() as i32;
        ((6 * s - 5 * b).rem_euclid(60)) as u8
    }

    pub const fn stem(self) -> Stem {
        self.stem
    }

    pub const fn branch(self) -> Branch {
        self.branch
    }

    /// Advance `steps` positions along the cycle (negative steps go back).
    pub fn offset(self, steps: i32) -> Self {
        Self::from_cycle_index((self.cycle_index() as i32 + steps).rem_euclid(60) as u8)
    }

    /// Sound-element label of this pair.
    pub const fn nayin(self) -> Nayin {
        Nayin::from_cycle_index(self.cycle_index())
    }

    /// Year pillar of a (bazi or calendar) year.
    pub fn for_year(year: i32) -> Self {
        Self::from_cycle_index((year - CYCLE_EPOCH_YEAR).rem_euclid(60) as u8)
    }
}

impl std::fmt::Display for GanZhi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem.name(), self.branch.name())
    }
}

/// All 60 pairs in cycle order.
pub fn sixty_cycle() -> impl Iterator<Item = GanZhi> {
    (0..60u8).map(GanZhi::from_cycle_index)
}
