//! The full pipeline from birth input to chart report.

use bazi_base::Gender;
use bazi_chart::{
    AnnualOutcome, ChartAnalysis, DayPillarSource, FourPillarChart, JulianDayCycle,
    RelationAnnotation, Timeline, analyze_chart, build_chart, generate_timeline, query_annual,
};
use bazi_search::{SolarTermContext, SolarTermSource, VsopSolarTerms, locate_solar_term};
use bazi_time::{BirthMoment, PolygonResolver, TimeResolution, TimezoneResolver, resolve_time};
use serde::Serialize;
use tracing::debug;

use crate::config::BaziConfig;
use crate::error::BaziError;

/// Everything computed for one birth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaziReport {
    pub birth: BirthMoment,
    pub time: TimeResolution,
    pub solar_terms: SolarTermContext,
    pub chart: FourPillarChart,
    pub analysis: ChartAnalysis,
    pub timeline: Timeline,
}

impl BaziReport {
    pub fn gender(&self) -> Gender {
        self.birth.gender
    }

    /// Relations among the four chart pillars.
    pub fn relations(&self) -> &[RelationAnnotation] {
        &self.analysis.relations
    }

    pub fn is_degraded(&self) -> bool {
        self.time.is_degraded()
    }
}

/// Chart engine holding its configuration and collaborators.
pub struct BaziEngine {
    config: BaziConfig,
    resolver: Box<dyn TimezoneResolver>,
    terms: Box<dyn SolarTermSource>,
    days: Box<dyn DayPillarSource>,
}

impl BaziEngine {
    /// Engine with the built-in collaborators chosen by `config`.
    pub fn new(config: BaziConfig) -> Result<Self, BaziError> {
        config.validate()?;
        let resolver = config.timezone.resolver()?;
        let terms = Box::new(VsopSolarTerms::new(config.solar_terms)?);
        Ok(Self::with_sources(config, resolver, terms, Box::new(JulianDayCycle)))
    }

    /// Engine with caller-supplied collaborators. Only the relation options
    /// of `config` are used.
    pub fn with_sources(
        config: BaziConfig,
        resolver: Box<dyn TimezoneResolver>,
        terms: Box<dyn SolarTermSource>,
        days: Box<dyn DayPillarSource>,
    ) -> Self {
        Self {
            config,
            resolver,
            terms,
            days,
        }
    }

    pub fn config(&self) -> &BaziConfig {
        &self.config
    }

    /// Run the whole pipeline for one birth.
    pub fn compute(&self, birth: &BirthMoment) -> Result<BaziReport, BaziError> {
        let time = resolve_time(birth.date, birth.time, &birth.location, self.resolver.as_ref())?;
        let normalized = time.time();
        let chart_time = normalized.chart_time();
        debug!(
            apparent = %normalized.apparent,
            %chart_time,
            degraded = time.is_degraded(),
            "solar time resolved"
        );

        let ctx = locate_solar_term(normalized.apparent, self.terms.as_ref())?;
        let chart = build_chart(&ctx, chart_time, self.days.as_ref())?;
        let analysis = analyze_chart(&chart, &self.config.relations);
        let timeline = generate_timeline(&chart, &ctx, birth.gender);
        debug!(
            chart = %chart,
            relations = analysis.relations.len(),
            onset_age = timeline.onset_age,
            "chart computed"
        );

        Ok(BaziReport {
            birth: *birth,
            time,
            solar_terms: ctx,
            chart,
            analysis,
            timeline,
        })
    }

    /// Annual period of `year` for a computed report.
    pub fn annual(&self, report: &BaziReport, year: i32) -> AnnualOutcome {
        query_annual(&report.chart, &report.timeline, year)
    }
}

impl Default for BaziEngine {
    fn default() -> Self {
        Self::with_sources(
            BaziConfig::default(),
            Box::new(PolygonResolver::new()),
            Box::new(VsopSolarTerms::default()),
            Box::new(JulianDayCycle),
        )
    }
}

impl std::fmt::Debug for BaziEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaziEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
