// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Engine configuration.
//!
//! All tolerances and limits used by the timeline operations live here so
//! a host can tune them from a YAML file. Every field has a default.

use crate::error::{EngineError, Result};
use crate::models::palette::{EnvironmentColor, ENVIRONMENT_COLORS};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable limits for the segmentation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum segment length for cuts, splits and grid cells (seconds).
    pub epsilon: f64,
    /// Minimum segment length while dragging a boundary (seconds).
    pub drag_min_gap: f64,
    /// Number of undo snapshots kept.
    pub history_capacity: usize,
    /// Shortest grid cell the BPM splitter may generate (seconds).
    pub min_grid_interval: f64,
    /// Beats per bar used when the caller does not pass one.
    pub default_beats_per_bar: u32,
    /// Environment rotation for newly created segments.
    pub palette: Vec<EnvironmentColor>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            drag_min_gap: 0.5,
            history_capacity: 30,
            min_grid_interval: 0.5,
            default_beats_per_bar: 4,
            palette: ENVIRONMENT_COLORS.clone(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("Failed to parse engine config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// A missing, unreadable or invalid file logs a warning and yields the
    /// default configuration.
    pub fn load(path: &Path) -> Self {
        log::info!("EngineConfig::load: Loading from {:?}", path);

        if !path.exists() {
            log::info!("EngineConfig::load: Config file doesn't exist, using defaults");
            return Self::default();
        }

        let result = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
            .and_then(|contents| Self::from_yaml_str(&contents));

        match result {
            Ok(config) => {
                log::info!("EngineConfig::load: Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("EngineConfig::load: {:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Check that the limits are usable.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.epsilon) {
            return Err(EngineError::InvalidConfig(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        if !positive(self.drag_min_gap) || self.drag_min_gap < self.epsilon {
            return Err(EngineError::InvalidConfig(format!(
                "drag_min_gap must be at least epsilon ({}), got {}",
                self.epsilon, self.drag_min_gap
            )));
        }
        if !positive(self.min_grid_interval) {
            return Err(EngineError::InvalidConfig(format!(
                "min_grid_interval must be positive, got {}",
                self.min_grid_interval
            )));
        }
        if self.history_capacity == 0 {
            return Err(EngineError::InvalidConfig(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        if self.default_beats_per_bar == 0 {
            return Err(EngineError::InvalidConfig(
                "default_beats_per_bar must be at least 1".to_string(),
            ));
        }
        if self.palette.is_empty() {
            return Err(EngineError::InvalidConfig("palette is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history_capacity, 30);
        assert_eq!(config.palette.len(), 8);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = EngineConfig::from_yaml_str("history_capacity: 5\nepsilon: 0.2\n").unwrap();
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.epsilon, 0.2);
        assert_eq!(config.drag_min_gap, 0.5);
        assert_eq!(config.palette.len(), 8);
    }

    #[test]
    fn test_rejects_gap_below_epsilon() {
        let err = EngineConfig::from_yaml_str("epsilon: 0.6\n").unwrap_err();
        assert!(format!("{:#}", err).contains("drag_min_gap"));
    }

    #[test]
    fn test_rejects_empty_palette() {
        assert!(EngineConfig::from_yaml_str("palette: []\n").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = EngineConfig::load(Path::new("/nonexistent/kuecut/config.yaml"));
        assert_eq!(config, EngineConfig::default());
    }
}
