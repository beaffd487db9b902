//! Ten-god (shishen) classification of a stem relative to the day stem.
//!
//! The category is fixed by how the other stem's element relates to the day
//! stem's element (same, generated by day, dominated by day, dominating day,
//! generating day) and whether the two stems share polarity.

use serde::Serialize;

use crate::stem::Stem;

/// Ten-god category, plus the reserved `DayMaster` label for the day stem itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TenGod {
    /// 比肩: same element, same polarity.
    Companion,
    /// 劫财: same element, opposite polarity.
    RobWealth,
    /// 食神: generated by the day stem, same polarity.
    EatingGod,
    /// 伤官: generated by the day stem, opposite polarity.
    HurtingOfficer,
    /// 偏财: dominated by the day stem, same polarity.
    IndirectWealth,
    /// 正财: dominated by the day stem, opposite polarity.
    DirectWealth,
    /// 七杀: dominates the day stem, same polarity.
    SevenKillings,
    /// 正官: dominates the day stem, opposite polarity.
    DirectOfficer,
    /// 偏印: generates the day stem, same polarity.
    IndirectResource,
    /// 正印: generates the day stem, opposite polarity.
    DirectResource,
    /// 日主: the day stem itself.
    DayMaster,
}

impl TenGod {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Companion => "比肩",
            Self::RobWealth => "劫财",
            Self::EatingGod => "食神",
            Self::HurtingOfficer => "伤官",
            Self::IndirectWealth => "偏财",
            Self::DirectWealth => "正财",
            Self::SevenKillings => "七杀",
            Self::DirectOfficer => "正官",
            Self::IndirectResource => "偏印",
            Self::DirectResource => "正印",
            Self::DayMaster => "日主",
        }
    }

    /// Map `DayMaster` to `Companion`; used when a stem equal to the day
    /// stem sits in another position.
    pub const fn outside_day_position(self) -> Self {
        match self {
            Self::DayMaster => Self::Companion,
            other => other,
        }
    }
}

impl std::fmt::Display for TenGod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify `other` relative to `day_stem`.
pub fn ten_god(day_stem: Stem, other: Stem) -> TenGod {
    if day_stem == other {
        return TenGod::DayMaster;
    }
    let me = day_stem.element();
    let them = other.element();
    let same_polarity = day_stem.polarity() == other.polarity();

    let (same, opposite) = if them == me {
        (TenGod::Companion, TenGod::RobWealth)
    } else if me.generates() == them {
        (TenGod::EatingGod, TenGod::HurtingOfficer)
    } else if me.dominates() == them {
        (TenGod::IndirectWealth, TenGod::DirectWealth)
    } else if them.dominates() == me {
        (TenGod::SevenKillings, TenGod::DirectOfficer)
    } else {
        (TenGod::IndirectResource, TenGod::DirectResource)
    };

    if same_polarity { same } else { opposite }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stem::ALL_STEMS;

    #[test]
    fn identity_is_day_master() {
        for s in ALL_STEMS {
            assert_eq!(ten_god(s, s), TenGod::DayMaster);
        }
    }

    #[test]
    fn jia_day_master_row() {
        let expected = [
            TenGod::DayMaster,
            TenGod::RobWealth,
            TenGod::EatingGod,
            TenGod::HurtingOfficer,
            TenGod::IndirectWealth,
            TenGod::DirectWealth,
            TenGod::SevenKillings,
            TenGod::DirectOfficer,
            TenGod::IndirectResource,
            TenGod::DirectResource,
        ];
        for (other, want) in ALL_STEMS.iter().zip(expected) {
            assert_eq!(ten_god(Stem::Jia, *other), want, "甲 vs {other}");
        }
    }

    #[test]
    fn yin_day_master_examples() {
        // 癸 water (yin): 戊 earth yang dominates it → 正官
        assert_eq!(ten_god(Stem::Gui, Stem::Wu), TenGod::DirectOfficer);
        // 癸 vs 丁 (fire yin): water dominates fire, same polarity → 偏财
        assert_eq!(ten_god(Stem::Gui, Stem::Ding), TenGod::IndirectWealth);
        // 戊 vs 丁: fire generates earth, opposite polarity → 正印
        assert_eq!(ten_god(Stem::Wu, Stem::Ding), TenGod::DirectResource);
    }

    #[test]
    fn each_row_covers_all_categories() {
        for day in ALL_STEMS {
            let mut seen: Vec<TenGod> = ALL_STEMS.iter().map(|o| ten_god(day, *o)).collect();
            seen.sort_by_key(|g| g.name());
            seen.dedup();
            assert_eq!(seen.len(), 10, "day stem {day}");
        }
    }
}
