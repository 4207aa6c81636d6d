//! Top-level configuration, stored as JSON.

use serde::{Deserialize, Serialize};

use crate::control::params::{DriverParams, SteeringParams};
use crate::error::Result;
use crate::learning::params::EvolutionParams;

/// All tunable parameters of an evolution run.
///
/// Missing fields fall back to their defaults, so a file only needs to list
/// what it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generational loop.
    pub evolution: EvolutionParams,
    /// Neural driver architecture and sensors.
    pub driver: DriverParams,
    /// Rule-based steering controller.
    pub steering: SteeringParams,
}

impl Config {
    /// Checks every section.
    pub fn validate(&self) -> Result<()> {
        self.evolution.validate()?;
        self.driver.validate()?;
        self.steering.avoidance.validate()
    }

    /// Saves the configuration to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
