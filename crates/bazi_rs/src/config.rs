//! Engine configuration, loadable from TOML.
//!
//! Every section is optional; missing keys take the defaults below.
//!
//! ```toml
//! [solar_terms]
//! reference_offset_minutes = 480
//!
//! [relations]
//! self_punishment_adjacent_only = false
//!
//! [timezone]
//! fixed_zone = "Asia/Shanghai"
//! ```

use std::path::Path;

use bazi_chart::DetectOptions;
use bazi_search::SolarTermConfig;
use bazi_time::{
    FixedZoneResolver, PolygonResolver, RegionResolver, TimezoneResolver, ZoneRegion,
};
use serde::{Deserialize, Serialize};

use crate::error::BaziError;

/// How birth coordinates map to a time zone.
///
/// With neither key set, zones come from the global boundary polygons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimezoneConfig {
    /// Use this IANA zone for every location, ignoring `regions`.
    pub fixed_zone: Option<String>,
    /// Rectangles checked in order; the first containing the location wins.
    /// Replaces the polygon lookup when non-empty.
    pub regions: Vec<ZoneRegion>,
}

impl TimezoneConfig {
    pub fn resolver(&self) -> Result<Box<dyn TimezoneResolver>, BaziError> {
        if let Some(zone) = &self.fixed_zone {
            return Ok(Box::new(FixedZoneResolver::new(zone)?));
        }
        if self.regions.is_empty() {
            return Ok(Box::new(PolygonResolver::new()));
        }
        Ok(Box::new(RegionResolver::new(self.regions.clone())?))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaziConfig {
    pub solar_terms: SolarTermConfig,
    pub relations: DetectOptions,
    pub timezone: TimezoneConfig,
}

impl BaziConfig {
    /// Read and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, BaziError> {
        let content = std::fs::read_to_string(path).map_err(|source| BaziError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, BaziError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BaziError> {
        self.solar_terms
            .validate()
            .map_err(|msg| BaziError::InvalidConfig(format!("solar_terms: {msg}")))?;
        Ok(())
    }
}
