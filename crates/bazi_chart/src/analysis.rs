//! Derived features of a finalized chart.
//!
//! Everything here is a pure function of a [`FourPillarChart`]: ten-god
//! labels, element tally, day-master roots, revealed month stems, warning
//! flags, the clash/combination context and a seasonal reference snapshot.

use bazi_base::{
    ALL_BRANCHES, ALL_ELEMENTS, Branch, Element, LifeStage, Season, Stem, Strength, TenGod,
    life_stage, seasonal_strength, ten_god,
};
use serde::Serialize;

use crate::builder::{CommandingStemInfo, FourPillarChart};
use crate::interaction::{DetectOptions, RelationAnnotation, RelationKind, detect_interactions};
use crate::pillar::PillarPosition;

/// Weight of a heavenly stem in the element tally.
pub const HEAVENLY_WEIGHT: f64 = 1.0;
/// Weight of a hidden stem in the element tally.
pub const HIDDEN_WEIGHT: f64 = 0.5;
/// Ratio at or above which one element is flagged as dominant.
pub const DOMINANT_RATIO: f64 = 0.6;

// ---------------------------------------------------------------------------
// Stem slots and ten-god map
// ---------------------------------------------------------------------------

/// Which stem of a pillar: the heavenly stem or one of the hidden stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StemSlot {
    Heavenly,
    /// 本气
    Principal,
    /// 中气
    Middle,
    /// 余气
    Residual,
}

impl StemSlot {
    /// Slot of the hidden stem at `index` in a list of `len` hidden stems.
    ///
    /// The first is principal; the second is middle; a third is residual.
    pub const fn hidden(index: usize, len: usize) -> Self {
        if index == 0 {
            Self::Principal
        } else if index == 1 || len == 2 {
            Self::Middle
        } else {
            Self::Residual
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Heavenly => "天干",
            Self::Principal => "本气",
            Self::Middle => "中气",
            Self::Residual => "余气",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TenGodEntry {
    pub position: PillarPosition,
    pub slot: StemSlot,
    pub stem: Stem,
    pub ten_god: TenGod,
}

/// Ten-god labels of every stem in the chart, in reading order: the four
/// heavenly stems, then the hidden stems pillar by pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenGodMap(Vec<TenGodEntry>);

impl TenGodMap {
    pub fn get(&self, position: PillarPosition, slot: StemSlot) -> Option<TenGod> {
        self.0
            .iter()
            .find(|e| e.position == position && e.slot == slot)
            .map(|e| e.ten_god)
    }

    pub fn entries(&self) -> &[TenGodEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Label every heavenly and hidden stem relative to the day master.
///
/// Only the day's heavenly stem is `DayMaster`; the same stem anywhere
/// else is `Companion`.
pub fn ten_god_map(chart: &FourPillarChart) -> TenGodMap {
    let day = chart.day_master();
    let label = |position: PillarPosition, slot: StemSlot, stem: Stem| {
        let god = ten_god(day, stem);
        TenGodEntry {
            position,
            slot,
            stem,
            ten_god: if position == PillarPosition::Day && slot == StemSlot::Heavenly {
                god
            } else {
                god.outside_day_position()
            },
        }
    };

    let mut entries: Vec<TenGodEntry> = chart
        .pillars()
        .into_iter()
        .map(|(position, pillar)| label(position, StemSlot::Heavenly, pillar.stem()))
        .collect();
    for (position, stem, slot) in hidden_stems(chart) {
        entries.push(label(position, slot, stem));
    }
    TenGodMap(entries)
}

fn hidden_stems(chart: &FourPillarChart) -> Vec<(PillarPosition, Stem, StemSlot)> {
    chart
        .pillars()
        .into_iter()
        .flat_map(|(position, pillar)| {
            let len = pillar.hidden_stems.len();
            pillar
                .hidden_stems
                .iter()
                .enumerate()
                .map(move |(i, stem)| (position, *stem, StemSlot::hidden(i, len)))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Element tally
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementSource {
    pub position: PillarPosition,
    pub slot: StemSlot,
    pub stem: Stem,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementTally {
    pub element: Element,
    /// Weighted count: heavenly stems 1.0, hidden stems 0.5.
    pub count: f64,
    /// Share of the total weighted count.
    pub ratio: f64,
    pub sources: Vec<ElementSource>,
}

/// Weighted element counts, one entry per element in generation order.
pub fn element_tally(chart: &FourPillarChart) -> Vec<ElementTally> {
    let mut tally: Vec<ElementTally> = ALL_ELEMENTS
        .iter()
        .map(|&element| ElementTally {
            element,
            count: 0.0,
            ratio: 0.0,
            sources: Vec::new(),
        })
        .collect();

    let heavenly = chart
        .pillars()
        .into_iter()
        .map(|(position, pillar)| (position, pillar.stem(), StemSlot::Heavenly));
    for (position, stem, slot) in heavenly.chain(hidden_stems(chart)) {
        let entry = &mut tally[stem.element().index() as usize];
        entry.count += match slot {
            StemSlot::Heavenly => HEAVENLY_WEIGHT,
            _ => HIDDEN_WEIGHT,
        };
        entry.sources.push(ElementSource {
            position,
            slot,
            stem,
        });
    }

    let total: f64 = tally.iter().map(|t| t.count).sum();
    if total > 0.0 {
        for t in &mut tally {
            t.ratio = t.count / total;
        }
    }
    tally
}

// ---------------------------------------------------------------------------
// Roots
// ---------------------------------------------------------------------------

/// A branch in which the day master is rooted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Root {
    pub position: PillarPosition,
    pub branch: Branch,
    pub stage: LifeStage,
    /// Slot of the first hidden stem sharing the day master's element;
    /// `None` when no hidden stem does.
    pub slot: Option<StemSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootAnalysis {
    pub has_root: bool,
    pub roots: Vec<Root>,
}

/// Branches where the day master's life stage is Growth, Crowned,
/// Official or Peak.
pub fn day_master_roots(chart: &FourPillarChart) -> RootAnalysis {
    let day = chart.day_master();
    let roots: Vec<Root> = chart
        .pillars()
        .into_iter()
        .filter_map(|(position, pillar)| {
            let stage = life_stage(day, pillar.branch());
            if !stage.is_rooting() {
                return None;
            }
            let len = pillar.hidden_stems.len();
            let slot = pillar
                .hidden_stems
                .iter()
                .position(|s| s.element() == day.element())
                .map(|i| StemSlot::hidden(i, len));
            Some(Root {
                position,
                branch: pillar.branch(),
                stage,
                slot,
            })
        })
        .collect();
    RootAnalysis {
        has_root: !roots.is_empty(),
        roots,
    }
}

// ---------------------------------------------------------------------------
// Revealed month stems
// ---------------------------------------------------------------------------

/// A hidden stem of the month branch and where it shows as a heavenly stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealedStem {
    pub stem: Stem,
    pub ten_god: TenGod,
    /// Year, month or hour positions whose heavenly stem is this stem.
    pub positions: Vec<PillarPosition>,
}

impl RevealedStem {
    pub fn is_revealed(&self) -> bool {
        !self.positions.is_empty()
    }
}

/// Month hidden stems checked against the non-day heavenly stems.
///
/// A hidden stem equal to the day master never counts as revealed.
pub fn revealed_month_stems(chart: &FourPillarChart) -> Vec<RevealedStem> {
    let day = chart.day_master();
    chart
        .month()
        .pillar
        .hidden_stems
        .iter()
        .map(|&stem| {
            let positions = if stem == day {
                Vec::new()
            } else {
                chart
                    .pillars()
                    .into_iter()
                    .filter(|(position, pillar)| {
                        *position != PillarPosition::Day && pillar.stem() == stem
                    })
                    .map(|(position, _)| position)
                    .collect()
            };
            RevealedStem {
                stem,
                ten_god: ten_god(day, stem).outside_day_position(),
                positions,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Flags and context
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DominantElement {
    pub element: Element,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialFlags {
    pub missing: Vec<Element>,
    pub dominant: Option<DominantElement>,
    pub all_yang: bool,
    pub all_yin: bool,
    pub no_root: bool,
}

pub fn special_flags(
    chart: &FourPillarChart,
    tally: &[ElementTally],
    roots: &RootAnalysis,
) -> SpecialFlags {
    let missing = tally
        .iter()
        .filter(|t| t.count == 0.0)
        .map(|t| t.element)
        .collect();
    // First maximum in generation order wins ties.
    let dominant = tally
        .iter()
        .fold(None::<&ElementTally>, |best, t| match best {
            Some(b) if b.count >= t.count => Some(b),
            _ => Some(t),
        })
        .filter(|t| t.ratio >= DOMINANT_RATIO)
        .map(|t| DominantElement {
            element: t.element,
            ratio: t.ratio,
        });
    let stems = chart.stems();
    SpecialFlags {
        missing,
        dominant,
        all_yang: stems.iter().all(|s| s.is_yang()),
        all_yin: stems.iter().all(|s| !s.is_yang()),
        no_root: !roots.has_root,
    }
}

/// Whether a chart holding both a clash and a combination has the
/// combination backed by the month's commanding stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClashCombinationContext {
    pub has_clash: bool,
    pub has_combination: bool,
    /// Set only when both are present: the first combination's element
    /// equals the commanding stem's element.
    pub combination_commanded: Option<bool>,
}

pub fn clash_combination_context(
    relations: &[RelationAnnotation],
    commanding: &CommandingStemInfo,
) -> ClashCombinationContext {
    let has_clash = relations.iter().any(|r| r.kind() == RelationKind::Clash);
    let first_combination = relations
        .iter()
        .find(|r| r.kind() == RelationKind::Combination)
        .and_then(RelationAnnotation::transformed_element);
    ClashCombinationContext {
        has_clash,
        has_combination: first_combination.is_some(),
        combination_commanded: first_combination
            .filter(|_| has_clash)
            .map(|element| element == commanding.element),
    }
}

// ---------------------------------------------------------------------------
// Seasonal snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonalSnapshot {
    pub season: Season,
    pub strengths: [(Element, Strength); 5],
    /// Day master's life stage at every branch, in cycle order.
    pub day_master_stages: [(Branch, LifeStage); 12],
}

pub fn seasonal_snapshot(chart: &FourPillarChart) -> SeasonalSnapshot {
    let season = Season::of(chart.month().pillar.branch());
    let day = chart.day_master();
    SeasonalSnapshot {
        season,
        strengths: ALL_ELEMENTS.map(|e| (e, seasonal_strength(season, e))),
        day_master_stages: ALL_BRANCHES.map(|b| (b, life_stage(day, b))),
    }
}

// ---------------------------------------------------------------------------
// Full analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartAnalysis {
    pub ten_gods: TenGodMap,
    pub elements: Vec<ElementTally>,
    pub roots: RootAnalysis,
    pub revealed: Vec<RevealedStem>,
    pub flags: SpecialFlags,
    pub relations: Vec<RelationAnnotation>,
    pub context: ClashCombinationContext,
    pub commanding: CommandingStemInfo,
    pub snapshot: SeasonalSnapshot,
}

/// Run every analysis over a chart.
pub fn analyze_chart(chart: &FourPillarChart, options: &DetectOptions) -> ChartAnalysis {
    let elements = element_tally(chart);
    let roots = day_master_roots(chart);
    let relations = detect_interactions(chart, options);
    ChartAnalysis {
        ten_gods: ten_god_map(chart),
        flags: special_flags(chart, &elements, &roots),
        context: clash_combination_context(&relations, chart.commanding()),
        revealed: revealed_month_stems(chart),
        commanding: *chart.commanding(),
        snapshot: seasonal_snapshot(chart),
        elements,
        roots,
        relations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{PartialChart, finalize};
    use crate::pillar::Pillar;
    use bazi_base::{GanZhi, commanding_stem};
    use chrono::NaiveDate;

    fn gz(s: &str) -> GanZhi {
        let mut chars = s.chars();
        let stem: Stem = chars.next().unwrap().to_string().parse().unwrap();
        let branch: Branch = chars.next().unwrap().to_string().parse().unwrap();
        GanZhi::new(stem, branch).unwrap()
    }

    fn chart(year: &str, month: &str, day: &str, hour: &str, days_in_month: f64) -> FourPillarChart {
        let month = gz(month);
        let partial = PartialChart {
            bazi_year: 1983,
            year: Pillar::new(gz(year)),
            month: Pillar::new(month),
            commanding: commanding_stem(month.branch(), days_in_month),
            hour_branch: gz(hour).branch(),
            chart_time: NaiveDate::from_ymd_opt(1984, 2, 4)
                .unwrap()
                .and_hms_opt(9, 18, 0)
                .unwrap(),
        };
        let c = finalize(partial, gz(day));
        assert_eq!(c.hour().to_string(), hour, "hour stem follows the day stem");
        c
    }

    fn example() -> FourPillarChart {
        chart("癸亥", "乙丑", "戊辰", "丁巳", 28.9)
    }

    #[test]
    fn ten_gods_of_example() {
        let map = ten_god_map(&example());
        use PillarPosition::*;
        assert_eq!(map.len(), 4 + 11);
        assert_eq!(map.get(Year, StemSlot::Heavenly), Some(TenGod::DirectWealth));
        assert_eq!(map.get(Month, StemSlot::Heavenly), Some(TenGod::DirectOfficer));
        assert_eq!(map.get(Day, StemSlot::Heavenly), Some(TenGod::DayMaster));
        assert_eq!(map.get(Hour, StemSlot::Heavenly), Some(TenGod::DirectResource));
        // 辰 holds 戊 as principal: same stem as the day master
        assert_eq!(map.get(Day, StemSlot::Principal), Some(TenGod::Companion));
        // 亥 holds 壬, 甲: second of two is middle
        assert_eq!(map.get(Year, StemSlot::Middle), Some(TenGod::SevenKillings));
        assert_eq!(map.get(Year, StemSlot::Residual), None);
    }

    #[test]
    fn tally_weights() {
        let tally = element_tally(&example());
        let counts: Vec<f64> = tally.iter().map(|t| t.count).collect();
        let expected = [2.0, 1.5, 2.5, 1.0, 2.5];
        for (got, want) in counts.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} vs {want}");
        }
        let ratio_sum: f64 = tally.iter().map(|t| t.ratio).sum();
        assert!((ratio_sum - 1.0).abs() < 1e-12);
        let sources: usize = tally.iter().map(|t| t.sources.len()).sum();
        assert_eq!(sources, 15);
    }

    #[test]
    fn roots_of_example() {
        let roots = day_master_roots(&example());
        assert!(roots.has_root);
        assert_eq!(roots.roots.len(), 2);
        assert_eq!(roots.roots[0].branch, Branch::Chen);
        assert_eq!(roots.roots[0].stage, LifeStage::Crowned);
        assert_eq!(roots.roots[0].slot, Some(StemSlot::Principal));
        assert_eq!(roots.roots[1].branch, Branch::Si);
        assert_eq!(roots.roots[1].stage, LifeStage::Official);
        assert_eq!(roots.roots[1].slot, Some(StemSlot::Middle));
    }

    #[test]
    fn revealed_gui_in_year() {
        let revealed = revealed_month_stems(&example());
        let stems: Vec<Stem> = revealed.iter().map(|r| r.stem).collect();
        assert_eq!(stems, vec![Stem::Ji, Stem::Gui, Stem::Xin]);
        assert!(!revealed[0].is_revealed());
        assert_eq!(revealed[1].positions, vec![PillarPosition::Year]);
        assert_eq!(revealed[1].ten_god, TenGod::DirectWealth);
        assert!(!revealed[2].is_revealed());
    }

    #[test]
    fn day_master_in_month_is_not_revealed() {
        // 丙寅 month holds 甲丙戊; the day stem 戊 is not counted even
        // though the hour stem is also 戊
        let c = chart("甲子", "丙寅", "戊午", "戊午", 3.0);
        let revealed = revealed_month_stems(&c);
        let wu = revealed.iter().find(|r| r.stem == Stem::Wu).unwrap();
        assert!(wu.positions.is_empty());
        let jia = revealed.iter().find(|r| r.stem == Stem::Jia).unwrap();
        assert_eq!(jia.positions, vec![PillarPosition::Year]);
    }

    #[test]
    fn flags_for_balanced_chart() {
        let c = example();
        let tally = element_tally(&c);
        let roots = day_master_roots(&c);
        let flags = special_flags(&c, &tally, &roots);
        assert!(flags.missing.is_empty());
        assert!(flags.dominant.is_none());
        assert!(!flags.all_yang);
        assert!(!flags.all_yin);
        assert!(!flags.no_root);
    }

    #[test]
    fn flags_for_water_heavy_chart() {
        // 壬子 ×3 with 庚子 hour: water dominates, no wood or fire
        let c = chart("壬子", "壬子", "壬子", "庚子", 15.0);
        let tally = element_tally(&c);
        let roots = day_master_roots(&c);
        let flags = special_flags(&c, &tally, &roots);
        assert_eq!(flags.missing, vec![Element::Wood, Element::Fire, Element::Earth]);
        let dominant = flags.dominant.unwrap();
        assert_eq!(dominant.element, Element::Water);
        assert!(dominant.ratio >= DOMINANT_RATIO);
        assert!(flags.all_yang);
        assert!(!flags.no_root);
    }

    #[test]
    fn context_needs_clash_and_combination() {
        let c = example();
        let relations = detect_interactions(&c, &DetectOptions::default());
        let ctx = clash_combination_context(&relations, c.commanding());
        // 巳亥 clash only
        assert!(ctx.has_clash);
        assert!(!ctx.has_combination);
        assert_eq!(ctx.combination_commanded, None);

        // 子午 clash and 子丑 earth combination, 丑 month commanded by 己 earth
        let c = chart("甲子", "丁丑", "甲午", "甲子", 20.0);
        let relations = detect_interactions(&c, &DetectOptions::default());
        let ctx = clash_combination_context(&relations, c.commanding());
        assert!(ctx.has_clash && ctx.has_combination);
        assert_eq!(ctx.combination_commanded, Some(true));
    }

    #[test]
    fn snapshot_covers_all_branches() {
        let snap = seasonal_snapshot(&example());
        assert_eq!(snap.season, Season::Winter);
        assert!(snap
            .strengths
            .contains(&(Element::Water, Strength::Prosperous)));
        assert_eq!(snap.day_master_stages[2], (Branch::Yin, LifeStage::Growth));
    }

    #[test]
    fn full_analysis_serializes() {
        let analysis = analyze_chart(&example(), &DetectOptions::default());
        let json = serde_json::to_value(&analysis).unwrap();
        assert!(json.get("ten_gods").is_some());
        assert_eq!(json["elements"].as_array().unwrap().len(), 5);
    }
}
