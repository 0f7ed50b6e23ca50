use serde::{Deserialize, Serialize};

use crate::biome::ElevationTable;
use crate::classify::Thresholds;
use crate::error::GenerateError;
use crate::raster::RasterConfig;

pub const MAX_DIMENSION: u32 = 8192;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetailLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl DetailLevel {
    pub fn multiplier(self) -> usize {
        match self {
            DetailLevel::Low => 1,
            DetailLevel::Medium => 2,
            DetailLevel::High => 4,
        }
    }
}

// How many seed points a map gets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointCountPolicy {
    // floor(sqrt(width)) * detail multiplier
    #[default]
    Detail,
    // width / 2, ignores detail
    HalfWidth,
}

impl PointCountPolicy {
    pub fn count(self, width: u32, detail: DetailLevel) -> usize {
        match self {
            PointCountPolicy::Detail => (width as f64).sqrt().floor() as usize * detail.multiplier(),
            PointCountPolicy::HalfWidth => (width / 2) as usize,
        }
    }
}

// Everything a generation run depends on; identical configs give identical heightmaps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub detail: DetailLevel,
    pub point_count: PointCountPolicy,
    pub thresholds: Thresholds,
    pub elevations: ElevationTable,
    pub raster: RasterConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            seed: 0,
            detail: DetailLevel::default(),
            point_count: PointCountPolicy::default(),
            thresholds: Thresholds::default(),
            elevations: ElevationTable::default(),
            raster: RasterConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            ..Self::default()
        }
    }

    pub fn with_detail(mut self, detail: DetailLevel) -> Self {
        self.detail = detail;
        self
    }

    pub fn with_point_count(mut self, policy: PointCountPolicy) -> Self {
        self.point_count = policy;
        self
    }

    pub fn with_raster(mut self, raster: RasterConfig) -> Self {
        self.raster = raster;
        self
    }

    pub fn target_points(&self) -> usize {
        self.point_count.count(self.width, self.detail)
    }

    pub fn validate(&self) -> Result<(), GenerateError> {
        let invalid = |msg: String| Err(GenerateError::InvalidConfig(msg));
        if self.width == 0 || self.height == 0 {
            return invalid(format!("map size {}x{} is empty", self.width, self.height));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return invalid(format!(
                "map size {}x{} exceeds {MAX_DIMENSION}",
                self.width, self.height
            ));
        }
        if self.raster.steps == 0 {
            return invalid("raster steps must be at least 1".into());
        }
        if !self.raster.multiplier.is_finite() || self.raster.multiplier < 0.0 {
            return invalid(format!("bad noise multiplier {}", self.raster.multiplier));
        }
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self, GenerateError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, GenerateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
