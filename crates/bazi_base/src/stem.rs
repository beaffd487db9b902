//! The ten heavenly stems (tiangan).

use std::str::FromStr;

use serde::Serialize;

use crate::element::{Element, Polarity};
use crate::error::BaseError;

/// A heavenly stem. Declaration order is cycle order (Jia = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All ten stems in cycle order.
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

const STEM_NAMES: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

impl Stem {
    /// 0-based cycle index (Jia=0 .. Gui=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem at a cycle position; wraps modulo 10.
    pub const fn from_index(index: u8) -> Self {
        ALL_STEMS[(index % 10) as usize]
    }

    /// Chinese character.
    pub const fn name(self) -> &'static str {
        STEM_NAMES[self as usize]
    }

    /// Stems pair off by element: Jia/Yi wood, Bing/Ding fire, ...
    pub const fn element(self) -> Element {
        match self {
            Self::Jia | Self::Yi => Element::Wood,
            Self::Bing | Self::Ding => Element::Fire,
            Self::Wu | Self::Ji => Element::Earth,
            Self::Geng | Self::Xin => Element::Metal,
            Self::Ren | Self::Gui => Element::Water,
        }
    }

    pub const fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    pub const fn is_yang(self) -> bool {
        matches!(self.polarity(), Polarity::Yang)
    }

    /// Advance `steps` positions along the cycle (negative steps go back).
    pub fn offset(self, steps: i32) -> Self {
        Self::from_index((self.index() as i32 + steps).rem_euclid(10) as u8)
    }

    /// True if this stem's element dominates `other`'s element.
    pub const fn dominates(self, other: Stem) -> bool {
        self.element().dominates() as u8 == other.element() as u8
    }
}

impl std::fmt::Display for Stem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stem {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STEM_NAMES
            .iter()
            .position(|n| *n == s)
            .map(|i| ALL_STEMS[i])
            .ok_or_else(|| BaseError::UnknownStem(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, s) in ALL_STEMS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
            assert_eq!(Stem::from_index(i as u8), *s);
        }
    }

    #[test]
    fn parse_names() {
        for s in ALL_STEMS {
            assert_eq!(s.name().parse::<Stem>().unwrap(), s);
        }
        assert!("子".parse::<Stem>().is_err());
    }

    #[test]
    fn offset_wraps_both_ways() {
        assert_eq!(Stem::Gui.offset(1), Stem::Jia);
        assert_eq!(Stem::Jia.offset(-1), Stem::Gui);
        assert_eq!(Stem::Bing.offset(-12), Stem::Jia);
    }

    #[test]
    fn domination() {
        // 庚 (metal) dominates 甲 (wood); 甲 dominates 戊 (earth)
        assert!(Stem::Geng.dominates(Stem::Jia));
        assert!(Stem::Jia.dominates(Stem::Wu));
        assert!(!Stem::Jia.dominates(Stem::Geng));
    }
}
