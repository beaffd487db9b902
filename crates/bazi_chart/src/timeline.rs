//! Major periods (大运) and annual periods (流年).

use bazi_base::{GanZhi, Gender, Nayin, Stem};
use bazi_search::{SolarTermBoundary, SolarTermContext};
use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use tracing::{debug, warn};

use crate::builder::FourPillarChart;
use crate::interaction::{PillarAt, RelationAnnotation, detect_cross};
use crate::pillar::PillarPosition;

/// Number of major periods generated.
pub const MAJOR_PERIOD_COUNT: u32 = 8;

/// Years covered by one major period.
pub const MAJOR_PERIOD_YEARS: u32 = 10;

/// Three days of birth-to-boundary distance count as one year of age.
const DAYS_PER_YEAR_OF_AGE: f64 = 3.0;

/// Direction in which the major periods step through the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// 顺行
    Forward,
    /// 逆行
    Reverse,
}

impl Direction {
    /// Forward for a yang year stem with a male, or a yin year stem with a
    /// female; reverse otherwise.
    pub const fn for_chart(year_stem: Stem, gender: Gender) -> Self {
        match (year_stem.is_yang(), gender) {
            (true, Gender::Male) | (false, Gender::Female) => Self::Forward,
            (true, Gender::Female) | (false, Gender::Male) => Self::Reverse,
        }
    }

    pub const fn step(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Forward => "顺行",
            Self::Reverse => "逆行",
        }
    }
}

/// One ten-year major period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MajorPeriod {
    /// 1-based sequence number.
    pub index: u32,
    pub pillar: GanZhi,
    pub nayin: Nayin,
    pub start_age: u32,
    /// Inclusive.
    pub end_age: u32,
}

impl MajorPeriod {
    pub fn contains_age(&self, age: i32) -> bool {
        i64::from(self.start_age) <= i64::from(age) && i64::from(age) <= i64::from(self.end_age)
    }
}

/// Major-period sequence of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub direction: Direction,
    /// Days from birth to the boundary the count ran to.
    pub onset_days: f64,
    pub onset_age: u32,
    /// Birth moment advanced by four months per counted day.
    pub onset_instant: NaiveDateTime,
    /// Next boundary when forward, previous boundary when reverse.
    pub target: SolarTermBoundary,
    pub periods: Vec<MajorPeriod>,
}

impl Timeline {
    /// Period whose age range contains `age`, boundaries inclusive.
    pub fn period_at_age(&self, age: i32) -> Option<&MajorPeriod> {
        self.periods.iter().find(|p| p.contains_age(age))
    }
}

/// Onset age for a birth-to-boundary distance in days.
///
/// Three days make one year, rounded half to even; the result is at
/// least 1.
pub fn onset_age(days: f64) -> u32 {
    let years = (days.max(0.0) / DAYS_PER_YEAR_OF_AGE).round_ties_even();
    (years as u32).max(1)
}

/// Major periods stepping from the month pillar.
pub fn generate_timeline(
    chart: &FourPillarChart,
    ctx: &SolarTermContext,
    gender: Gender,
) -> Timeline {
    let direction = Direction::for_chart(chart.year().stem(), gender);
    let (onset_days, target) = match direction {
        Direction::Forward => (ctx.days_to_next, ctx.next),
        Direction::Reverse => (ctx.days_since_previous, ctx.previous),
    };
    let onset_age = onset_age(onset_days);

    let month = chart.month().pillar.ganzhi;
    let periods = (1..=MAJOR_PERIOD_COUNT)
        .map(|index| {
            let pillar = month.offset(direction.step() * index as i32);
            let start_age = onset_age + (index - 1) * MAJOR_PERIOD_YEARS;
            MajorPeriod {
                index,
                pillar,
                nayin: pillar.nayin(),
                start_age,
                end_age: start_age + MAJOR_PERIOD_YEARS - 1,
            }
        })
        .collect();

    let onset_instant = advance_by_counted_days(ctx.apparent, onset_days);
    debug!(
        direction = direction.name(),
        onset_days, onset_age, %onset_instant, "major periods generated"
    );

    Timeline {
        direction,
        onset_days,
        onset_age,
        onset_instant,
        target,
        periods,
    }
}

// One counted day stands for 365.25 / 3 days of life.
fn advance_by_counted_days(birth: NaiveDateTime, days: f64) -> NaiveDateTime {
    let millis = (days.max(0.0) * 365.25 / DAYS_PER_YEAR_OF_AGE * 86_400_000.0).round() as i64;
    match birth.checked_add_signed(TimeDelta::milliseconds(millis)) {
        Some(instant) => instant,
        None => {
            warn!(%birth, days, "onset instant out of range; using birth time");
            birth
        }
    }
}

// ---------------------------------------------------------------------------
// Annual periods
// ---------------------------------------------------------------------------

/// Pillar of a calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnnualPeriod {
    pub year: i32,
    pub pillar: GanZhi,
    pub nayin: Nayin,
}

impl AnnualPeriod {
    pub fn for_year(year: i32) -> Self {
        let pillar = GanZhi::for_year(year);
        Self {
            year,
            pillar,
            nayin: pillar.nayin(),
        }
    }
}

/// Relations of an annual pillar with the chart and the active major period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualAnalysis {
    pub annual: AnnualPeriod,
    /// Calendar year minus bazi year.
    pub age: i32,
    pub major_period: MajorPeriod,
    /// Relations with each chart pillar, in year-month-day-hour order.
    pub against_chart: Vec<RelationAnnotation>,
    pub against_major_period: Vec<RelationAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnnualOutcome {
    Found(AnnualAnalysis),
    /// No major period covers the age (before onset or past the last one).
    NotFound { annual: AnnualPeriod, age: i32 },
}

impl AnnualOutcome {
    pub fn analysis(&self) -> Option<&AnnualAnalysis> {
        match self {
            Self::Found(a) => Some(a),
            Self::NotFound { .. } => None,
        }
    }

    pub fn annual(&self) -> &AnnualPeriod {
        match self {
            Self::Found(a) => &a.annual,
            Self::NotFound { annual, .. } => annual,
        }
    }
}

/// Annual pillar of `year` checked against the chart and the major period
/// active at that age.
pub fn query_annual(chart: &FourPillarChart, timeline: &Timeline, year: i32) -> AnnualOutcome {
    let annual = AnnualPeriod::for_year(year);
    let age = year - chart.bazi_year();
    let Some(major_period) = timeline.period_at_age(age).copied() else {
        debug!(year, age, "no major period covers age");
        return AnnualOutcome::NotFound { annual, age };
    };

    let incoming = PillarAt::new(PillarPosition::Annual, annual.pillar);
    let against_chart = chart
        .pillars()
        .into_iter()
        .flat_map(|(position, pillar)| detect_cross(incoming, PillarAt::new(position, pillar.ganzhi)))
        .collect();
    let against_major_period = detect_cross(
        incoming,
        PillarAt::new(PillarPosition::MajorPeriod, major_period.pillar),
    );

    AnnualOutcome::Found(AnnualAnalysis {
        annual,
        age,
        major_period,
        against_chart,
        against_major_period,
    })
}
