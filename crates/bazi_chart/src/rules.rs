//! Stem derivation for the month and hour pillars.
//!
//! Five-tiger rule: the year stem fixes the stem of the 寅 month; later
//! months advance one stem per month in node order. Five-rat rule: the day
//! stem fixes the stem of the 子 hour; later hours advance one stem each.

use bazi_base::{Branch, GanZhi, Stem};

/// Pillar of the 寅 month for a year stem (五虎遁).
///
/// 甲己→丙寅, 乙庚→戊寅, 丙辛→庚寅, 丁壬→壬寅, 戊癸→甲寅.
pub const fn tiger_start(year_stem: Stem) -> GanZhi {
    GanZhi::from_cycle_index(match year_stem {
        Stem::Jia | Stem::Ji => 2,
        Stem::Yi | Stem::Geng => 14,
        Stem::Bing | Stem::Xin => 26,
        Stem::Ding | Stem::Ren => 38,
        Stem::Wu | Stem::Gui => 50,
    })
}

/// Pillar of the 子 hour for a day stem (五鼠遁).
///
/// 甲己→甲子, 乙庚→丙子, 丙辛→戊子, 丁壬→庚子, 戊癸→壬子.
pub const fn rat_start(day_stem: Stem) -> GanZhi {
    GanZhi::from_cycle_index(match day_stem {
        Stem::Jia | Stem::Ji => 0,
        Stem::Yi | Stem::Geng => 12,
        Stem::Bing | Stem::Xin => 24,
        Stem::Ding | Stem::Ren => 36,
        Stem::Wu | Stem::Gui => 48,
    })
}

/// Month pillar from the year stem and the month branch.
///
/// Each month in node order is one step along the cycle from 寅.
pub fn month_pillar(year_stem: Stem, month_branch: Branch) -> GanZhi {
    tiger_start(year_stem).offset(i32::from(month_branch.node_offset()))
}

/// Hour pillar from the day stem and the hour branch.
pub fn hour_pillar(day_stem: Stem, hour_branch: Branch) -> GanZhi {
    rat_start(day_stem).offset(i32::from(hour_branch.index()))
}
