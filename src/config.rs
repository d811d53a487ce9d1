//! TOML configuration for layout spacing and analytics limits.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub origin_x: f64,
    pub origin_y: f64,
    pub spacing_x: f64,
    pub spacing_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 40.0,
            origin_y: 40.0,
            spacing_x: 320.0,
            spacing_y: 260.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Size of the compact hub summary.
    pub top_hubs: usize,
    /// Size of the expanded hub list.
    pub expanded_hubs: usize,
    pub recent_tables: usize,
    /// Columns at or above this null percentage are flagged.
    pub high_null_threshold: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_hubs: 3,
            expanded_hubs: 8,
            recent_tables: 5,
            high_null_threshold: 50.0,
        }
    }
}

impl Config {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&input)
    }
}
