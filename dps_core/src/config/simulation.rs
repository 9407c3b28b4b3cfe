//! SimulationConfig - Run parameters and feature flags

use super::load_toml;
use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for one simulation run. Every field has a default, so a TOML
/// file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Maximum simulated time in seconds
    pub max_time: f64,
    /// Fixed tick length in seconds
    pub time_step: f64,
    /// Verbose logging plus periodic status lines
    pub debug_mode: bool,
    /// Seconds of simulated time between status lines in debug mode
    pub reporting_interval: f64,

    pub enable_auto_attacks: bool,
    pub enable_spell_casts: bool,
    pub enable_item_effects: bool,
    pub enable_trait_effects: bool,

    /// Preallocation hint for the world
    pub max_entities: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            max_time: 30.0,
            time_step: 0.1,
            debug_mode: false,
            reporting_interval: 5.0,
            enable_auto_attacks: true,
            enable_spell_casts: true,
            enable_item_effects: true,
            enable_trait_effects: true,
            max_entities: 100,
        }
    }
}

impl SimulationConfig {
    /// Load from a TOML file and validate
    pub fn from_file(path: &Path) -> SimResult<Self> {
        let config: SimulationConfig = load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges, naming the first offending field
    pub fn validate(&self) -> SimResult<()> {
        if !(self.max_time > 0.0) {
            return Err(invalid("MaxTime", format!("must be positive, got {}", self.max_time)));
        }
        if !(self.time_step > 0.0) {
            return Err(invalid("TimeStep", format!("must be positive, got {}", self.time_step)));
        }
        if self.time_step > self.max_time {
            return Err(invalid(
                "TimeStep",
                format!("({}) cannot exceed MaxTime ({})", self.time_step, self.max_time),
            ));
        }
        if self.debug_mode && !(self.reporting_interval > 0.0) {
            return Err(invalid(
                "ReportingInterval",
                format!("must be positive in debug mode, got {}", self.reporting_interval),
            ));
        }
        Ok(())
    }

    pub fn with_max_time(mut self, max_time: f64) -> Self {
        self.max_time = max_time;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    pub fn with_reporting_interval(mut self, interval: f64) -> Self {
        self.reporting_interval = interval;
        self
    }

    pub fn with_auto_attacks(mut self, enabled: bool) -> Self {
        self.enable_auto_attacks = enabled;
        self
    }

    pub fn with_spell_casts(mut self, enabled: bool) -> Self {
        self.enable_spell_casts = enabled;
        self
    }

    pub fn with_item_effects(mut self, enabled: bool) -> Self {
        self.enable_item_effects = enabled;
        self
    }

    pub fn with_trait_effects(mut self, enabled: bool) -> Self {
        self.enable_trait_effects = enabled;
        self
    }
}

fn invalid(field: &'static str, reason: String) -> SimError {
    SimError::InvalidConfig { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_toml;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_time, 30.0);
        assert_eq!(config.max_entities, 100);
    }

    #[test]
    fn test_validation_names_field() {
        let cases = [
            (SimulationConfig::default().with_max_time(0.0), "MaxTime"),
            (SimulationConfig::default().with_time_step(-0.1), "TimeStep"),
            (SimulationConfig::default().with_max_time(1.0).with_time_step(2.0), "TimeStep"),
            (
                SimulationConfig::default().with_debug_mode(true).with_reporting_interval(0.0),
                "ReportingInterval",
            ),
        ];
        for (config, expected) in cases {
            match config.validate() {
                Err(SimError::InvalidConfig { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected InvalidConfig for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SimulationConfig = parse_toml(
            r#"
            max_time = 10.0
            enable_trait_effects = false
            "#,
        )
        .unwrap();
        assert_eq!(config.max_time, 10.0);
        assert_eq!(config.time_step, 0.1);
        assert!(!config.enable_trait_effects);
        assert!(config.enable_item_effects);
    }
}
