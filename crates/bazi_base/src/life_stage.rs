//! Twelve life-cycle stages (changsheng) of a stem across the branches.
//!
//! Yang stems run forward through the branches from their birth branch,
//! yin stems run backward. Earth stems follow the fire stems.

use serde::Serialize;

use crate::branch::Branch;
use crate::stem::Stem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LifeStage {
    /// 长生
    Growth,
    /// 沐浴
    Bath,
    /// 冠带
    Crowned,
    /// 临官
    Official,
    /// 帝旺
    Peak,
    /// 衰
    Decline,
    /// 病
    Sickness,
    /// 死
    Death,
    /// 墓
    Tomb,
    /// 绝
    Extinction,
    /// 胎
    Conception,
    /// 养
    Nurture,
}

pub const ALL_LIFE_STAGES: [LifeStage; 12] = [
    LifeStage::Growth,
    LifeStage::Bath,
    LifeStage::Crowned,
    LifeStage::Official,
    LifeStage::Peak,
    LifeStage::Decline,
    LifeStage::Sickness,
    LifeStage::Death,
    LifeStage::Tomb,
    LifeStage::Extinction,
    LifeStage::Conception,
    LifeStage::Nurture,
];

impl LifeStage {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Growth => "长生",
            Self::Bath => "沐浴",
            Self::Crowned => "冠带",
            Self::Official => "临官",
            Self::Peak => "帝旺",
            Self::Decline => "衰",
            Self::Sickness => "病",
            Self::Death => "死",
            Self::Tomb => "墓",
            Self::Extinction => "绝",
            Self::Conception => "胎",
            Self::Nurture => "养",
        }
    }

    /// Stages in which the day master is considered rooted.
    pub const fn is_rooting(self) -> bool {
        matches!(
            self,
            Self::Peak | Self::Official | Self::Growth | Self::Crowned
        )
    }
}

/// Branch on which a stem's Growth stage falls.
const fn growth_branch(stem: Stem) -> Branch {
    match stem {
        Stem::Jia => Branch::Hai,
        Stem::Bing | Stem::Wu => Branch::Yin,
        Stem::Geng => Branch::Si,
        Stem::Ren => Branch::Shen,
        Stem::Yi => Branch::Wu,
        Stem::Ding | Stem::Ji => Branch::You,
        Stem::Xin => Branch::Zi,
        Stem::Gui => Branch::Mao,
    }
}

/// Life-cycle stage of `stem` at `branch`.
pub fn life_stage(stem: Stem, branch: Branch) -> LifeStage {
    let start = growth_branch(stem).index() as i32;
    let at = branch.index() as i32;
    let steps = if stem.is_yang() {
        (at - start).rem_euclid(12)
    } else {
        (start - at).rem_euclid(12)
    };
    ALL_LIFE_STAGES[steps as usize]
}
