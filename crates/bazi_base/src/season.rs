//! Seasons of the month branch and seasonal strength (wang-xiang-xiu-qiu-si).

use serde::Serialize;

use crate::branch::Branch;
use crate::element::Element;

/// Season, fixed by the month branch rather than the calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Season of a month branch: 寅卯辰 spring, 巳午未 summer,
    /// 申酉戌 autumn, 亥子丑 winter.
    pub const fn of(month_branch: Branch) -> Self {
        match month_branch {
            Branch::Yin | Branch::Mao | Branch::Chen => Self::Spring,
            Branch::Si | Branch::Wu | Branch::Wei => Self::Summer,
            Branch::Shen | Branch::You | Branch::Xu => Self::Autumn,
            Branch::Hai | Branch::Zi | Branch::Chou => Self::Winter,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Spring => "春",
            Self::Summer => "夏",
            Self::Autumn => "秋",
            Self::Winter => "冬",
        }
    }

    /// Element in command during the season.
    pub const fn ruling_element(self) -> Element {
        match self {
            Self::Spring => Element::Wood,
            Self::Summer => Element::Fire,
            Self::Autumn => Element::Metal,
            Self::Winter => Element::Water,
        }
    }
}

/// Seasonal strength grade of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strength {
    /// 旺
    Prosperous,
    /// 相
    Strong,
    /// 休
    Resting,
    /// 囚
    Confined,
    /// 死
    Dead,
}

impl Strength {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Prosperous => "旺",
            Self::Strong => "相",
            Self::Resting => "休",
            Self::Confined => "囚",
            Self::Dead => "死",
        }
    }
}

/// Strength of `element` during `season`.
///
/// The ruling element is prosperous, the element it generates is strong,
/// its parent rests, the element dominating it is confined and the
/// element it dominates is dead.
pub fn seasonal_strength(season: Season, element: Element) -> Strength {
    let ruler = season.ruling_element();
    if element == ruler {
        Strength::Prosperous
    } else if element == ruler.generates() {
        Strength::Strong
    } else if element == ruler.generated_by() {
        Strength::Resting
    } else if element == ruler.dominated_by() {
        Strength::Confined
    } else {
        Strength::Dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ALL_ELEMENTS;

    #[test]
    fn spring_row() {
        let s = Season::Spring;
        assert_eq!(seasonal_strength(s, Element::Wood), Strength::Prosperous);
        assert_eq!(seasonal_strength(s, Element::Fire), Strength::Strong);
        assert_eq!(seasonal_strength(s, Element::Water), Strength::Resting);
        assert_eq!(seasonal_strength(s, Element::Metal), Strength::Confined);
        assert_eq!(seasonal_strength(s, Element::Earth), Strength::Dead);
    }

    #[test]
    fn winter_row() {
        let s = Season::Winter;
        assert_eq!(seasonal_strength(s, Element::Water), Strength::Prosperous);
        assert_eq!(seasonal_strength(s, Element::Wood), Strength::Strong);
        assert_eq!(seasonal_strength(s, Element::Metal), Strength::Resting);
        assert_eq!(seasonal_strength(s, Element::Earth), Strength::Confined);
        assert_eq!(seasonal_strength(s, Element::Fire), Strength::Dead);
    }

    #[test]
    fn each_season_uses_every_grade_once() {
        for season in [Season::Spring, Season::Summer, Season::Autumn, Season::Winter] {
            let mut names: Vec<_> = ALL_ELEMENTS
                .iter()
                .map(|e| seasonal_strength(season, *e).name())
                .collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), 5);
        }
    }

    #[test]
    fn month_branch_seasons() {
        assert_eq!(Season::of(Branch::Chou), Season::Winter);
        assert_eq!(Season::of(Branch::Yin), Season::Spring);
        assert_eq!(Season::of(Branch::Wei), Season::Summer);
        assert_eq!(Season::of(Branch::Xu), Season::Autumn);
    }
}
