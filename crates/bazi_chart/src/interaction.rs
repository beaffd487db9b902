//! Branch and pillar relation detection.
//!
//! Within a chart, pair rules (clash, combination, harm) run over the six
//! unordered position pairs and set rules (three-harmony, punishments) run
//! over the whole branch multiset. Between a period pillar and another
//! pillar, the pair rules run together with compound clash and exact
//! match. Every match is reported; nothing is suppressed or ranked.

use bazi_base::relation::{
    MUTUAL_PUNISHMENT, SELF_PUNISHMENT, THREE_HARMONIES, THREE_PUNISHMENTS, clashes, combination,
    contains_all, count, dominating_stem, harms,
};
use bazi_base::{Branch, Element, GanZhi, PunishmentKind, Stem};
use serde::{Deserialize, Serialize};

use crate::builder::FourPillarChart;
use crate::pillar::PillarPosition;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Ordinary,
    /// 极凶
    Extreme,
}

/// A branch at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BranchAt {
    pub position: PillarPosition,
    pub branch: Branch,
}

/// A whole pillar at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PillarAt {
    pub position: PillarPosition,
    pub ganzhi: GanZhi,
}

impl PillarAt {
    pub const fn new(position: PillarPosition, ganzhi: GanZhi) -> Self {
        Self { position, ganzhi }
    }

    pub const fn branch_at(self) -> BranchAt {
        BranchAt {
            position: self.position,
            branch: self.ganzhi.branch(),
        }
    }
}

/// Relation category, without participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationKind {
    Clash,
    Combination,
    ThreeHarmony,
    ThreePunishment,
    MutualPunishment,
    SelfPunishment,
    Harm,
    CompoundClash,
    ExactMatch,
}

impl RelationKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clash => "六冲",
            Self::Combination => "六合",
            Self::ThreeHarmony => "三合",
            Self::ThreePunishment => "三刑",
            Self::MutualPunishment => "相刑",
            Self::SelfPunishment => "自刑",
            Self::Harm => "六害",
            Self::CompoundClash => "天克地冲",
            Self::ExactMatch => "岁运并临",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One detected relation and its participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RelationAnnotation {
    Clash {
        a: BranchAt,
        b: BranchAt,
    },
    Combination {
        a: BranchAt,
        b: BranchAt,
        element: Element,
    },
    /// All three frame branches present; `members` lists every position
    /// holding one of them.
    ThreeHarmony {
        frame: [Branch; 3],
        element: Element,
        members: Vec<BranchAt>,
    },
    ThreePunishment {
        set: [Branch; 3],
        kind: PunishmentKind,
        members: Vec<BranchAt>,
    },
    /// 子卯 both present.
    MutualPunishment {
        kind: PunishmentKind,
        members: Vec<BranchAt>,
    },
    /// A self-punishing branch occurring at least twice.
    SelfPunishment {
        branch: Branch,
        members: Vec<BranchAt>,
    },
    Harm {
        a: BranchAt,
        b: BranchAt,
    },
    /// Stems in a domination relation and branches clashing.
    CompoundClash {
        a: PillarAt,
        b: PillarAt,
        dominating: Stem,
        dominated: Stem,
        severity: Severity,
    },
    /// Identical stem and branch.
    ExactMatch {
        a: PillarAt,
        b: PillarAt,
        severity: Severity,
    },
}

impl RelationAnnotation {
    pub fn kind(&self) -> RelationKind {
        match self {
            Self::Clash { .. } => RelationKind::Clash,
            Self::Combination { .. } => RelationKind::Combination,
            Self::ThreeHarmony { .. } => RelationKind::ThreeHarmony,
            Self::ThreePunishment { .. } => RelationKind::ThreePunishment,
            Self::MutualPunishment { .. } => RelationKind::MutualPunishment,
            Self::SelfPunishment { .. } => RelationKind::SelfPunishment,
            Self::Harm { .. } => RelationKind::Harm,
            Self::CompoundClash { .. } => RelationKind::CompoundClash,
            Self::ExactMatch { .. } => RelationKind::ExactMatch,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::CompoundClash { severity, .. } | Self::ExactMatch { severity, .. } => *severity,
            _ => Severity::Ordinary,
        }
    }

    /// Element formed by a combination or three-harmony.
    pub fn transformed_element(&self) -> Option<Element> {
        match self {
            Self::Combination { element, .. } | Self::ThreeHarmony { element, .. } => {
                Some(*element)
            }
            _ => None,
        }
    }

    /// Positions taking part, in the order recorded.
    pub fn positions(&self) -> Vec<PillarPosition> {
        match self {
            Self::Clash { a, b } | Self::Combination { a, b, .. } | Self::Harm { a, b } => {
                vec![a.position, b.position]
            }
            Self::ThreeHarmony { members, .. }
            | Self::ThreePunishment { members, .. }
            | Self::MutualPunishment { members, .. }
            | Self::SelfPunishment { members, .. } => {
                members.iter().map(|m| m.position).collect()
            }
            Self::CompoundClash { a, b, .. } | Self::ExactMatch { a, b, .. } => {
                vec![a.position, b.position]
            }
        }
    }
}

/// Detector options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectOptions {
    /// Report self-punishment only when two occurrences sit in adjacent
    /// chart positions. Off by default: any two occurrences count.
    pub self_punishment_adjacent_only: bool,
}

// ---------------------------------------------------------------------------
// Chart-internal detection
// ---------------------------------------------------------------------------

/// All branch relations among the four chart pillars.
pub fn detect_interactions(
    chart: &FourPillarChart,
    options: &DetectOptions,
) -> Vec<RelationAnnotation> {
    let branches = chart.pillars().map(|(position, pillar)| BranchAt {
        position,
        branch: pillar.branch(),
    });
    detect_branch_relations(&branches, options)
}

/// Branch relations among an arbitrary set of positioned branches.
///
/// Output order: clashes, combinations, three-harmonies, three-punishments,
/// mutual punishment, self-punishments, harms.
pub fn detect_branch_relations(
    branches: &[BranchAt],
    options: &DetectOptions,
) -> Vec<RelationAnnotation> {
    let mut out = Vec::new();
    let plain: Vec<Branch> = branches.iter().map(|b| b.branch).collect();

    for (a, b) in unordered_pairs(branches) {
        if clashes(a.branch, b.branch) {
            out.push(RelationAnnotation::Clash { a, b });
        }
    }
    for (a, b) in unordered_pairs(branches) {
        if let Some(element) = combination(a.branch, b.branch) {
            out.push(RelationAnnotation::Combination { a, b, element });
        }
    }

    for (frame, element) in THREE_HARMONIES {
        if contains_all(&plain, &frame) {
            out.push(RelationAnnotation::ThreeHarmony {
                frame,
                element,
                members: members_in(branches, &frame),
            });
        }
    }

    for (set, kind) in THREE_PUNISHMENTS {
        if contains_all(&plain, &set) {
            out.push(RelationAnnotation::ThreePunishment {
                set,
                kind,
                members: members_in(branches, &set),
            });
        }
    }
    let (pair, kind) = MUTUAL_PUNISHMENT;
    if contains_all(&plain, &pair) {
        out.push(RelationAnnotation::MutualPunishment {
            kind,
            members: members_in(branches, &pair),
        });
    }
    for branch in SELF_PUNISHMENT {
        if count(&plain, branch) < 2 {
            continue;
        }
        let members = members_in(branches, &[branch]);
        if options.self_punishment_adjacent_only && !has_adjacent_pair(&members) {
            continue;
        }
        out.push(RelationAnnotation::SelfPunishment { branch, members });
    }

    for (a, b) in unordered_pairs(branches) {
        if harms(a.branch, b.branch) {
            out.push(RelationAnnotation::Harm { a, b });
        }
    }
    out
}

fn unordered_pairs(items: &[BranchAt]) -> impl Iterator<Item = (BranchAt, BranchAt)> + '_ {
    items
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| items[i + 1..].iter().map(move |b| (*a, *b)))
}

fn members_in(branches: &[BranchAt], set: &[Branch]) -> Vec<BranchAt> {
    branches
        .iter()
        .filter(|b| set.contains(&b.branch))
        .copied()
        .collect()
}

fn has_adjacent_pair(members: &[BranchAt]) -> bool {
    members
        .iter()
        .enumerate()
        .any(|(i, a)| members[i + 1..].iter().any(|b| a.position.is_adjacent(b.position)))
}

// ---------------------------------------------------------------------------
// Cross-period detection
// ---------------------------------------------------------------------------

/// Relations between an incoming period pillar and one other pillar.
///
/// Output order: clash, combination, harm, compound clash, exact match.
pub fn detect_cross(incoming: PillarAt, against: PillarAt) -> Vec<RelationAnnotation> {
    let mut out = Vec::new();
    let (a, b) = (incoming.branch_at(), against.branch_at());

    if clashes(a.branch, b.branch) {
        out.push(RelationAnnotation::Clash { a, b });
    }
    if let Some(element) = combination(a.branch, b.branch) {
        out.push(RelationAnnotation::Combination { a, b, element });
    }
    if harms(a.branch, b.branch) {
        out.push(RelationAnnotation::Harm { a, b });
    }
    if clashes(a.branch, b.branch) {
        let (sa, sb) = (incoming.ganzhi.stem(), against.ganzhi.stem());
        if let Some(dominating) = dominating_stem(sa, sb) {
            let dominated = if dominating == sa { sb } else { sa };
            out.push(RelationAnnotation::CompoundClash {
                a: incoming,
                b: against,
                dominating,
                dominated,
                severity: Severity::Extreme,
            });
        }
    }
    if incoming.ganzhi == against.ganzhi {
        out.push(RelationAnnotation::ExactMatch {
            a: incoming,
            b: against,
            severity: Severity::Extreme,
        });
    }
    out
}
