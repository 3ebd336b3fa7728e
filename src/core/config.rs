//! Simulation configuration with documented constants
//!
//! All tunable numbers of the scheduler are collected here. Grid geometry
//! (cell and dwarf sizes) is fixed and lives in `spatial::grid` instead.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{BunkerError, Result};

/// Configuration for the simulation systems
///
/// Every field has a default, so a TOML file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === MOVEMENT ===
    /// Maximum vertical displacement per `advance` call (world units)
    ///
    /// Smaller than the horizontal limit: climbing is slower than walking.
    pub vertical_step: i64,

    /// Maximum horizontal displacement per `advance` call (world units)
    pub horizontal_step: i64,

    // === CONSTRUCTION ===
    /// Number of stationary work steps needed to finish a plan
    ///
    /// At 100, each step adds 0.01 progress.
    pub construction_steps: u32,

    // === SCHEDULER ===
    /// Maximum frontier expansions per tick, shared by all dwarves
    ///
    /// Dwarves whose search is not resolved within the budget stay idle for
    /// the tick and search again from scratch on the next one.
    pub search_budget: usize,

    // === SETUP ===
    /// Seed for the dwarf name generator
    pub name_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            vertical_step: 3,
            horizontal_step: 5,
            construction_steps: 100,
            search_budget: 1000,
            name_seed: 0x9d54_6264,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text, then validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.vertical_step <= 0 || self.horizontal_step <= 0 {
            return Err(BunkerError::InvalidConfig(format!(
                "step limits must be positive (vertical {}, horizontal {})",
                self.vertical_step, self.horizontal_step
            )));
        }

        if self.construction_steps == 0 {
            return Err(BunkerError::InvalidConfig(
                "construction_steps must be at least 1".into(),
            ));
        }

        if self.search_budget == 0 {
            return Err(BunkerError::InvalidConfig(
                "search_budget must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Progress added by one construction step, as a fraction of the plan
    pub fn construction_rate(&self) -> f64 {
        1.0 / self.construction_steps as f64
    }
}
