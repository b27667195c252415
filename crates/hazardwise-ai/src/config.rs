//! Engine parameters.
//!
//! Defaults reproduce the reference behaviour; a JSON file may override any
//! subset of keys.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_NEIGHBOR_COUNT: usize = 9;
pub const DEFAULT_WEIGHT_SMOOTHING: f64 = 0.025;
pub const DEFAULT_MAX_STEPS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EngineConfig {
    /// Number of nearest training cases that vote.
    pub neighbor_count: usize,
    /// Additive constant `c` in the neighbour weight `1 / (distance + c)`.
    /// Smaller values let the closest case dominate the vote.
    pub weight_smoothing: f64,
    /// Templates selected per report.
    pub max_steps: usize,
    /// Clamp normalized query features into `[0, 1]` before the distance
    /// search. Off by default: a query outside the training range keeps its
    /// out-of-range components.
    pub clamp_query_features: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            neighbor_count: DEFAULT_NEIGHBOR_COUNT,
            weight_smoothing: DEFAULT_WEIGHT_SMOOTHING,
            max_steps: DEFAULT_MAX_STEPS,
            clamp_query_features: false,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.neighbor_count == 0 {
            return Err(ConfigError::Invalid("neighborCount must be at least 1".into()));
        }
        if !self.weight_smoothing.is_finite() || self.weight_smoothing <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "weightSmoothing must be a positive number, got {}",
                self.weight_smoothing
            )));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::Invalid("maxSteps must be at least 1".into()));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
