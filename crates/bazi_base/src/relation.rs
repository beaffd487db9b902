//! Fixed branch and stem relation tables.
//!
//! Provides the six clashes, six combinations, four three-harmony frames,
//! the punishment sets (three-way, mutual and self), the six harms, and
//! the mutual stem-domination test used by compound clashes.

use serde::Serialize;

use crate::branch::Branch;
use crate::element::Element;
use crate::stem::Stem;

// ---------------------------------------------------------------------------
// Clash (六冲)
// ---------------------------------------------------------------------------

/// The branch directly opposite `branch` (six positions away).
pub const fn clash_partner(branch: Branch) -> Branch {
    Branch::from_index((branch.index() + 6) % 12)
}

/// Symmetric and irreflexive.
pub const fn clashes(a: Branch, b: Branch) -> bool {
    clash_partner(a) as u8 == b as u8
}

// ---------------------------------------------------------------------------
// Combination (六合)
// ---------------------------------------------------------------------------

/// Element produced when `a` and `b` form a six-combination, else `None`.
///
/// 子丑 earth, 寅亥 wood, 卯戌 fire, 辰酉 metal, 巳申 water, 午未 earth.
pub const fn combination(a: Branch, b: Branch) -> Option<Element> {
    use Branch::*;
    match (a, b) {
        (Zi, Chou) | (Chou, Zi) => Some(Element::Earth),
        (Yin, Hai) | (Hai, Yin) => Some(Element::Wood),
        (Mao, Xu) | (Xu, Mao) => Some(Element::Fire),
        (Chen, You) | (You, Chen) => Some(Element::Metal),
        (Si, Shen) | (Shen, Si) => Some(Element::Water),
        (Wu, Wei) | (Wei, Wu) => Some(Element::Earth),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Three-harmony (三合)
// ---------------------------------------------------------------------------

/// Three-harmony frames and the element each one forms.
pub const THREE_HARMONIES: [([Branch; 3], Element); 4] = [
    ([Branch::Shen, Branch::Zi, Branch::Chen], Element::Water),
    ([Branch::Hai, Branch::Mao, Branch::Wei], Element::Wood),
    ([Branch::Yin, Branch::Wu, Branch::Xu], Element::Fire),
    ([Branch::Si, Branch::You, Branch::Chou], Element::Metal),
];

// ---------------------------------------------------------------------------
// Punishment (刑)
// ---------------------------------------------------------------------------

/// Named character of a punishment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PunishmentKind {
    /// 无恩之刑 (寅巳申)
    Ungrateful,
    /// 恃势之刑 (丑未戌)
    Bullying,
    /// 无礼之刑 (子卯)
    Discourteous,
}

impl PunishmentKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ungrateful => "无恩之刑",
            Self::Bullying => "恃势之刑",
            Self::Discourteous => "无礼之刑",
        }
    }
}

/// Three-way punishment sets.
pub const THREE_PUNISHMENTS: [([Branch; 3], PunishmentKind); 2] = [
    ([Branch::Yin, Branch::Si, Branch::Shen], PunishmentKind::Ungrateful),
    ([Branch::Chou, Branch::Wei, Branch::Xu], PunishmentKind::Bullying),
];

/// The single two-branch mutual punishment.
pub const MUTUAL_PUNISHMENT: ([Branch; 2], PunishmentKind) =
    ([Branch::Zi, Branch::Mao], PunishmentKind::Discourteous);

/// Branches that punish themselves when repeated.
pub const SELF_PUNISHMENT: [Branch; 4] = [Branch::Chen, Branch::Wu, Branch::You, Branch::Hai];

pub const fn is_self_punishing(branch: Branch) -> bool {
    matches!(branch, Branch::Chen | Branch::Wu | Branch::You | Branch::Hai)
}

// ---------------------------------------------------------------------------
// Harm (六害)
// ---------------------------------------------------------------------------

/// 子未, 丑午, 寅巳, 卯辰, 申亥, 酉戌.
pub const fn harms(a: Branch, b: Branch) -> bool {
    use Branch::*;
    matches!(
        (a, b),
        (Zi, Wei)
            | (Wei, Zi)
            | (Chou, Wu)
            | (Wu, Chou)
            | (Yin, Si)
            | (Si, Yin)
            | (Mao, Chen)
            | (Chen, Mao)
            | (Shen, Hai)
            | (Hai, Shen)
            | (You, Xu)
            | (Xu, You)
    )
}

// ---------------------------------------------------------------------------
// Stem domination
// ---------------------------------------------------------------------------

/// The dominating stem of the pair, if either dominates the other.
pub const fn dominating_stem(a: Stem, b: Stem) -> Option<Stem> {
    if a.dominates(b) {
        Some(a)
    } else if b.dominates(a) {
        Some(b)
    } else {
        None
    }
}

/// True when either stem dominates the other (order-independent).
pub const fn stems_clash(a: Stem, b: Stem) -> bool {
    dominating_stem(a, b).is_some()
}

// ---------------------------------------------------------------------------
// Multiset helpers
// ---------------------------------------------------------------------------

/// Occurrences of `branch` in `branches`.
pub fn count(branches: &[Branch], branch: Branch) -> usize {
    branches.iter().filter(|b| **b == branch).count()
}

/// True when every member of `set` occurs at least once in `branches`.
pub fn contains_all(branches: &[Branch], set: &[Branch]) -> bool {
    set.iter().all(|m| branches.contains(m))
}
