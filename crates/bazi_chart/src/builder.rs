//! Four-pillar chart construction.
//!
//! Construction runs in two phases. [`build_partial`] needs only the
//! solar-term context and the chart time: it fixes the year and month
//! pillars, the month's commanding stem and the hour branch. [`finalize`]
//! adds the day pillar and completes everything that depends on the day
//! stem (hour stem, commanding stem ten-god).

use bazi_base::{
    Branch, CommandingStem, Element, GanZhi, Stem, SubPeriod, TenGod, commanding_stem, ten_god,
};
use bazi_search::SolarTermContext;
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use tracing::debug;

use crate::day_pillar::DayPillarSource;
use crate::error::ChartError;
use crate::pillar::{CHART_POSITIONS, Pillar, PillarPosition};
use crate::rules::{hour_pillar, month_pillar};

/// Commanding stem of the month, labelled relative to the day stem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CommandingStemInfo {
    pub stem: Stem,
    pub element: Element,
    pub sub_period: SubPeriod,
    /// Days elapsed since the sub-period began.
    pub days_into: f64,
    pub ten_god: TenGod,
}

impl CommandingStemInfo {
    fn labelled(base: CommandingStem, day_stem: Stem) -> Self {
        Self {
            stem: base.stem,
            element: base.element,
            sub_period: base.sub_period,
            days_into: base.days_into,
            ten_god: ten_god(day_stem, base.stem),
        }
    }
}

/// Month pillar together with its commanding stem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthPillar {
    pub pillar: Pillar,
    pub commanding: CommandingStemInfo,
}

/// Chart state before the day pillar is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartialChart {
    pub bazi_year: i32,
    pub year: Pillar,
    pub month: Pillar,
    /// Commanding stem without its ten-god label.
    pub commanding: CommandingStem,
    pub hour_branch: Branch,
    /// Time keying the day and hour pillars.
    pub chart_time: NaiveDateTime,
}

/// A complete four-pillar chart.
///
/// Only [`finalize`] produces one, so the pillars always agree with each
/// other; fields are read through accessors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FourPillarChart {
    bazi_year: i32,
    year: Pillar,
    month: MonthPillar,
    day: Pillar,
    hour: Pillar,
    chart_time: NaiveDateTime,
}

impl FourPillarChart {
    pub fn bazi_year(&self) -> i32 {
        self.bazi_year
    }

    pub fn year(&self) -> &Pillar {
        &self.year
    }

    pub fn month(&self) -> &MonthPillar {
        &self.month
    }

    pub fn day(&self) -> &Pillar {
        &self.day
    }

    pub fn hour(&self) -> &Pillar {
        &self.hour
    }

    pub fn chart_time(&self) -> NaiveDateTime {
        self.chart_time
    }

    /// The day stem (日主).
    pub fn day_master(&self) -> Stem {
        self.day.stem()
    }

    pub fn commanding(&self) -> &CommandingStemInfo {
        &self.month.commanding
    }

    /// Pillar at a chart position; `None` for period positions.
    pub fn pillar(&self, position: PillarPosition) -> Option<&Pillar> {
        match position {
            PillarPosition::Year => Some(&self.year),
            PillarPosition::Month => Some(&self.month.pillar),
            PillarPosition::Day => Some(&self.day),
            PillarPosition::Hour => Some(&self.hour),
            PillarPosition::MajorPeriod | PillarPosition::Annual => None,
        }
    }

    /// The four pillars in reading order.
    pub fn pillars(&self) -> [(PillarPosition, &Pillar); 4] {
        [
            (CHART_POSITIONS[0], &self.year),
            (CHART_POSITIONS[1], &self.month.pillar),
            (CHART_POSITIONS[2], &self.day),
            (CHART_POSITIONS[3], &self.hour),
        ]
    }

    pub fn branches(&self) -> [Branch; 4] {
        [
            self.year.branch(),
            self.month.pillar.branch(),
            self.day.branch(),
            self.hour.branch(),
        ]
    }

    pub fn stems(&self) -> [Stem; 4] {
        [
            self.year.stem(),
            self.month.pillar.stem(),
            self.day.stem(),
            self.hour.stem(),
        ]
    }
}

impl std::fmt::Display for FourPillarChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.year, self.month.pillar, self.day, self.hour
        )
    }
}

/// First phase: everything that does not depend on the day stem.
///
/// `chart_time` is the late-zi adjusted time; month and year come from the
/// context, which is keyed to the unadjusted apparent time.
pub fn build_partial(ctx: &SolarTermContext, chart_time: NaiveDateTime) -> PartialChart {
    let year = GanZhi::for_year(ctx.bazi_year);
    let month = month_pillar(year.stem(), ctx.month_branch);
    PartialChart {
        bazi_year: ctx.bazi_year,
        year: Pillar::new(year),
        month: Pillar::new(month),
        commanding: commanding_stem(ctx.month_branch, ctx.days_since_previous),
        hour_branch: Branch::from_hour(chart_time.hour()),
        chart_time,
    }
}

/// Second phase: add the day pillar and the day-stem dependent parts.
pub fn finalize(partial: PartialChart, day: GanZhi) -> FourPillarChart {
    let day_stem = day.stem();
    FourPillarChart {
        bazi_year: partial.bazi_year,
        year: partial.year,
        month: MonthPillar {
            pillar: partial.month,
            commanding: CommandingStemInfo::labelled(partial.commanding, day_stem),
        },
        day: Pillar::new(day),
        hour: Pillar::new(hour_pillar(day_stem, partial.hour_branch)),
        chart_time: partial.chart_time,
    }
}

/// Build a chart: both phases with the day pillar from `day_source`.
pub fn build_chart<D: DayPillarSource + ?Sized>(
    ctx: &SolarTermContext,
    chart_time: NaiveDateTime,
    day_source: &D,
) -> Result<FourPillarChart, ChartError> {
    let partial = build_partial(ctx, chart_time);
    let day = day_source.day_pillar(chart_time)?;
    let chart = finalize(partial, day);
    debug!(chart = %chart, bazi_year = chart.bazi_year, "four pillars built");
    Ok(chart)
}
