//! A single pillar and the chart positions it can occupy.

use bazi_base::{Branch, Element, GanZhi, Nayin, Stem};
use serde::Serialize;

/// Where a pillar sits. The first four are chart positions; the last two
/// label the periods compared against a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
    MajorPeriod,
    Annual,
}

/// The four chart positions in reading order.
pub const CHART_POSITIONS: [PillarPosition; 4] = [
    PillarPosition::Year,
    PillarPosition::Month,
    PillarPosition::Day,
    PillarPosition::Hour,
];

impl PillarPosition {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "年柱",
            Self::Month => "月柱",
            Self::Day => "日柱",
            Self::Hour => "时柱",
            Self::MajorPeriod => "大运",
            Self::Annual => "流年",
        }
    }

    /// True for the four positions of a natal chart.
    pub const fn is_chart(self) -> bool {
        matches!(self, Self::Year | Self::Month | Self::Day | Self::Hour)
    }

    /// Chart positions that sit next to each other.
    pub const fn is_adjacent(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Year, Self::Month)
                | (Self::Month, Self::Year)
                | (Self::Month, Self::Day)
                | (Self::Day, Self::Month)
                | (Self::Day, Self::Hour)
                | (Self::Hour, Self::Day)
        )
    }
}

impl std::fmt::Display for PillarPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A stem-branch pair with its derived attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pillar {
    pub ganzhi: GanZhi,
    /// Hidden stems of the branch, principal first.
    pub hidden_stems: &'static [Stem],
    pub stem_element: Element,
    pub branch_element: Element,
    pub nayin: Nayin,
}

impl Pillar {
    pub fn new(ganzhi: GanZhi) -> Self {
        Self {
            ganzhi,
            hidden_stems: ganzhi.branch().hidden_stems(),
            stem_element: ganzhi.stem().element(),
            branch_element: ganzhi.branch().element(),
            nayin: ganzhi.nayin(),
        }
    }

    pub const fn stem(&self) -> Stem {
        self.ganzhi.stem()
    }

    pub const fn branch(&self) -> Branch {
        self.ganzhi.branch()
    }
}

impl From<GanZhi> for Pillar {
    fn from(ganzhi: GanZhi) -> Self {
        Self::new(ganzhi)
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.ganzhi, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_attributes() {
        let p = Pillar::new(GanZhi::for_year(1983));
        assert_eq!(p.to_string(), "癸亥");
        assert_eq!(p.stem_element, Element::Water);
        assert_eq!(p.branch_element, Element::Water);
        assert_eq!(p.hidden_stems, &[Stem::Ren, Stem::Jia]);
        assert_eq!(p.nayin.name(), "大海水");
    }

    #[test]
    fn adjacency() {
        use PillarPosition::*;
        assert!(Year.is_adjacent(Month));
        assert!(Hour.is_adjacent(Day));
        assert!(!Year.is_adjacent(Day));
        assert!(!Year.is_adjacent(Year));
        assert!(!Annual.is_adjacent(Year));
    }
}
