//! The twelve earthly branches (dizhi) and their hidden stems.

use std::str::FromStr;

use serde::Serialize;

use crate::element::{Element, Polarity};
use crate::error::BaseError;
use crate::stem::Stem;

/// An earthly branch. Declaration order is cycle order (Zi = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All twelve branches in cycle order.
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

/// Month-branch order starting at the Start of Spring month (寅).
pub const NODE_ORDER: [Branch; 12] = [
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
    Branch::Zi,
    Branch::Chou,
];

const BRANCH_NAMES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// Hidden stems per branch, principal qi first.
const HIDDEN_STEMS: [&[Stem]; 12] = [
    &[Stem::Gui],                     // 子
    &[Stem::Ji, Stem::Gui, Stem::Xin], // 丑
    &[Stem::Jia, Stem::Bing, Stem::Wu], // 寅
    &[Stem::Yi],                      // 卯
    &[Stem::Wu, Stem::Yi, Stem::Gui], // 辰
    &[Stem::Bing, Stem::Wu, Stem::Geng], // 巳
    &[Stem::Ding, Stem::Ji],          // 午
    &[Stem::Ji, Stem::Ding, Stem::Yi], // 未
    &[Stem::Geng, Stem::Ren, Stem::Wu], // 申
    &[Stem::Xin],                     // 酉
    &[Stem::Wu, Stem::Xin, Stem::Ding], // 戌
    &[Stem::Ren, Stem::Jia],          // 亥
];

impl Branch {
    /// 0-based cycle index (Zi=0 .. Hai=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch at a cycle position; wraps modulo 12.
    pub const fn from_index(index: u8) -> Self {
        ALL_BRANCHES[(index % 12) as usize]
    }

    pub const fn name(self) -> &'static str {
        BRANCH_NAMES[self as usize]
    }

    pub const fn element(self) -> Element {
        match self {
            Self::Yin | Self::Mao => Element::Wood,
            Self::Si | Self::Wu => Element::Fire,
            Self::Shen | Self::You => Element::Metal,
            Self::Hai | Self::Zi => Element::Water,
            Self::Chen | Self::Xu | Self::Chou | Self::Wei => Element::Earth,
        }
    }

    pub const fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    /// Hidden stems, principal first (1–3 entries).
    pub const fn hidden_stems(self) -> &'static [Stem] {
        HIDDEN_STEMS[self as usize]
    }

    /// Position in [`NODE_ORDER`] (寅 = 0 .. 丑 = 11).
    pub const fn node_offset(self) -> u8 {
        (self.index() + 10) % 12
    }

    /// Advance `steps` positions along the cycle (negative steps go back).
    pub fn offset(self, steps: i32) -> Self {
        Self::from_index((self.index() as i32 + steps).rem_euclid(12) as u8)
    }

    /// Branch of the two-hour bucket containing `hour` (0–23).
    ///
    /// 23:00–00:59 is 子, 01:00–02:59 is 丑, and so on.
    pub const fn from_hour(hour: u32) -> Self {
        if hour >= 23 {
            Self::Zi
        } else {
            Self::from_index(((hour + 1) / 2) as u8)
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Branch {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BRANCH_NAMES
            .iter()
            .position(|n| *n == s)
            .map(|i| ALL_BRANCHES[i])
            .ok_or_else(|| BaseError::UnknownBranch(s.to_string()))
    }
}
