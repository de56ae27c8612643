//! Run configuration loaded from TOML
//!
//! ```toml
//! [model]
//! exit_threshold = 0.35
//! incumbent_shape = { alpha = 5.0, beta = 1.0 }
//!
//! [batch]
//! num_draws = 1000
//! base_seed = 42
//! ```
//!
//! Missing tables and keys take their default values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::params::ModelParams;

/// Settings for a batch of independent draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Number of samples to draw
    pub num_draws: usize,
    /// Seed of the first draw; draw i uses base_seed + i.
    /// Derived from the clock when absent.
    pub base_seed: Option<u64>,
}

impl Default for BatchSettings {
    fn default() -> Self {
        BatchSettings {
            num_draws: 200_000,
            base_seed: None,
        }
    }
}

/// Top-level run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub model: ModelParams,
    pub batch: BatchSettings,
}

impl RunConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(text)?;
        config.model.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
