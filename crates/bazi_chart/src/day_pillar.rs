//! Day pillar lookup.

use bazi_base::GanZhi;
use bazi_time::julian_day_number;
use chrono::NaiveDateTime;

use crate::error::ChartError;

/// Source of the day pillar for a chart time.
///
/// Called with the chart time, which is already advanced one day for
/// late-zi births.
pub trait DayPillarSource: Send + Sync {
    fn day_pillar(&self, chart_time: NaiveDateTime) -> Result<GanZhi, ChartError>;
}

/// Day pillar from the continuous sexagenary day count.
///
/// The count is anchored so that JDN 2451545 (2000-01-01) is 戊午:
/// position = (JDN + 49) mod 60.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JulianDayCycle;

impl JulianDayCycle {
    pub fn for_date(date: chrono::NaiveDate) -> GanZhi {
        GanZhi::from_cycle_index((julian_day_number(date) + 49).rem_euclid(60) as u8)
    }
}

impl DayPillarSource for JulianDayCycle {
    fn day_pillar(&self, chart_time: NaiveDateTime) -> Result<GanZhi, ChartError> {
        Ok(Self::for_date(chart_time.date()))
    }
}
