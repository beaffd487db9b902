//! Commanding stem (siling) of a month branch.
//!
//! Each month branch splits the span from its node boundary into two or
//! three sub-periods, each ruled by one stem. The last entry is always the
//! branch's principal qi.

use serde::Serialize;

use crate::branch::Branch;
use crate::element::Element;
use crate::stem::Stem;

/// Sub-period within a month branch's span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SubPeriod {
    /// 余气: carried over from the previous month.
    Residual,
    /// 中气
    Middle,
    /// 本气
    Principal,
}

impl SubPeriod {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Residual => "余气",
            Self::Middle => "中气",
            Self::Principal => "本气",
        }
    }
}

/// Commanding stem for a day within a month branch's span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CommandingStem {
    pub stem: Stem,
    pub element: Element,
    pub sub_period: SubPeriod,
    /// Days elapsed since the sub-period began.
    pub days_into: f64,
}

/// (stem, span in days) per branch, indexed by branch cycle index.
const SUB_PERIODS: [&[(Stem, u8)]; 12] = [
    &[(Stem::Ren, 10), (Stem::Gui, 20)],                   // 子
    &[(Stem::Gui, 9), (Stem::Xin, 3), (Stem::Ji, 18)],     // 丑
    &[(Stem::Wu, 7), (Stem::Bing, 7), (Stem::Jia, 16)],    // 寅
    &[(Stem::Jia, 10), (Stem::Yi, 20)],                    // 卯
    &[(Stem::Yi, 9), (Stem::Gui, 3), (Stem::Wu, 18)],      // 辰
    &[(Stem::Wu, 5), (Stem::Geng, 9), (Stem::Bing, 16)],   // 巳
    &[(Stem::Bing, 10), (Stem::Ji, 9), (Stem::Ding, 11)],  // 午
    &[(Stem::Ding, 9), (Stem::Yi, 3), (Stem::Ji, 18)],     // 未
    &[(Stem::Wu, 7), (Stem::Ren, 7), (Stem::Geng, 16)],    // 申
    &[(Stem::Geng, 10), (Stem::Xin, 20)],                  // 酉
    &[(Stem::Xin, 9), (Stem::Ding, 3), (Stem::Wu, 18)],    // 戌
    &[(Stem::Wu, 7), (Stem::Jia, 5), (Stem::Ren, 18)],     // 亥
];

/// Ordered (stem, span-days) sub-periods of a month branch.
pub const fn sub_periods(branch: Branch) -> &'static [(Stem, u8)] {
    SUB_PERIODS[branch.index() as usize]
}

const fn sub_period_kind(position: usize, len: usize) -> SubPeriod {
    if position + 1 == len {
        SubPeriod::Principal
    } else if position == 0 {
        SubPeriod::Residual
    } else {
        SubPeriod::Middle
    }
}

/// Commanding stem `days_since_boundary` days after the branch's node.
///
/// Spans accumulate until their running total exceeds the day count.
/// Negative input counts as day 0; days past the table total stay in the
/// principal sub-period.
pub fn commanding_stem(branch: Branch, days_since_boundary: f64) -> CommandingStem {
    let table = sub_periods(branch);
    let days = days_since_boundary.max(0.0);
    let mut start = 0.0;
    let mut chosen = table.len() - 1;
    for (i, &(_, span)) in table.iter().enumerate() {
        let end = start + f64::from(span);
        if days < end {
            chosen = i;
            break;
        }
        if i + 1 < table.len() {
            start = end;
        }
    }
    let (stem, _) = table[chosen];
    CommandingStem {
        stem,
        element: stem.element(),
        sub_period: sub_period_kind(chosen, table.len()),
        days_into: days - start,
    }
}
