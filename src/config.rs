//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::devices::ScheduleRow;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the household preset. Load from TOML
/// with [`ScenarioConfig::from_toml_file`] or use one of the built-in
/// presets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation timing and global parameters.
    pub simulation: SimulationConfig,
    /// Battery parameters for the single-unit scenarios.
    pub battery: BatteryUnitConfig,
    /// Fleet composition for the multi-unit scenario.
    pub fleet: FleetConfig,
    /// Household demand parameters.
    pub household: HouseholdConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::household()
    }
}

/// Simulation timing and global parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Scenario kind: `"fleet"`, `"household"`, or `"single"`.
    pub scenario: String,
    /// Number of timesteps per simulated day (must be > 0).
    pub steps_per_day: usize,
    /// Number of days to simulate (must be > 0).
    pub days: usize,
    /// Master random seed.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scenario: "household".to_string(),
            steps_per_day: 24,
            days: 7,
            seed: 42,
        }
    }
}

/// Battery parameters for the single-unit scenarios.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryUnitConfig {
    /// Upper bound on stored energy (must be > 0).
    pub max_capacity: f32,
    /// Initial stored energy (within `[0, max_capacity]`).
    pub initial_capacity: f32,
    /// Maximum charging power (>= 0).
    pub max_charge_rate: f32,
    /// Maximum discharging power, non-positive.
    pub max_discharge_rate: f32,
}

impl Default for BatteryUnitConfig {
    fn default() -> Self {
        Self {
            max_capacity: 40.0,
            initial_capacity: 40.0,
            max_charge_rate: 5.0,
            max_discharge_rate: -5.0,
        }
    }
}

/// Fleet composition for the multi-unit scenario.
///
/// Each unit draws its initial capacity and rate limits uniformly below the
/// stated maxima, seeded from the master seed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FleetConfig {
    /// Number of units in the fleet (must be > 0).
    pub units: usize,
    /// Shared upper bound on stored energy.
    pub max_capacity: f32,
    /// Upper bound for randomized charge rates (>= 0).
    pub max_charge_rate: f32,
    /// Lower bound for randomized discharge rates, non-positive.
    pub max_discharge_rate: f32,
    /// Standard deviation of the aggregate-demand random walk.
    pub walk_sigma: f32,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            units: 5,
            max_capacity: 100_000.0,
            max_charge_rate: 10.0,
            max_discharge_rate: -10.0,
            walk_sigma: 0.1,
        }
    }
}

/// Household demand parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseholdConfig {
    /// Forecast window for the threshold controller, in steps.
    pub forecast_window: usize,
    /// Optional schedule file (whitespace columns: target, uncertainty,
    /// flex). Without it the built-in daily profile is used.
    pub schedule_path: Option<String>,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            forecast_window: 24,
            schedule_path: None,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.steps_per_day"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Returns the five-unit fleet preset with a random-walk demand signal.
    pub fn fleet() -> Self {
        Self {
            simulation: SimulationConfig {
                scenario: "fleet".to_string(),
                ..SimulationConfig::default()
            },
            battery: BatteryUnitConfig::default(),
            fleet: FleetConfig::default(),
            household: HouseholdConfig::default(),
        }
    }

    /// Returns the household preset: one full 40-unit battery smoothing a
    /// scheduled daily demand pattern through the threshold controller.
    pub fn household() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            battery: BatteryUnitConfig::default(),
            fleet: FleetConfig::default(),
            household: HouseholdConfig::default(),
        }
    }

    /// Returns the single-battery preset: one large unit driven by a
    /// perturbed version of its own realized rate.
    pub fn single() -> Self {
        Self {
            simulation: SimulationConfig {
                scenario: "single".to_string(),
                ..SimulationConfig::default()
            },
            battery: BatteryUnitConfig {
                max_capacity: 10_000.0,
                initial_capacity: 5_000.0,
                max_charge_rate: 10.0,
                max_discharge_rate: -20.0,
            },
            fleet: FleetConfig::default(),
            household: HouseholdConfig::default(),
        }
    }

    /// Looks up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "fleet" => Some(Self::fleet()),
            "household" => Some(Self::household()),
            "single" => Some(Self::single()),
            _ => None,
        }
    }

    /// Loads and validates a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file cannot be read, does not
    /// parse, or violates a field constraint.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::new("(file)", format!("cannot read {path:?}: {e}")))?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| ConfigError::new("(toml)", format!("parse failure: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.simulation;
        if !matches!(s.scenario.as_str(), "fleet" | "household" | "single") {
            return Err(ConfigError::new(
                "simulation.scenario",
                format!("unknown scenario {:?}", s.scenario),
            ));
        }
        if s.steps_per_day == 0 {
            return Err(ConfigError::new("simulation.steps_per_day", "must be > 0"));
        }
        if s.days == 0 {
            return Err(ConfigError::new("simulation.days", "must be > 0"));
        }

        let b = &self.battery;
        if b.max_capacity <= 0.0 {
            return Err(ConfigError::new("battery.max_capacity", "must be > 0"));
        }
        if !(0.0..=b.max_capacity).contains(&b.initial_capacity) {
            return Err(ConfigError::new(
                "battery.initial_capacity",
                "must lie within [0, max_capacity]",
            ));
        }
        if b.max_charge_rate < 0.0 {
            return Err(ConfigError::new("battery.max_charge_rate", "must be >= 0"));
        }
        if b.max_discharge_rate > 0.0 {
            return Err(ConfigError::new(
                "battery.max_discharge_rate",
                "must be <= 0",
            ));
        }

        let f = &self.fleet;
        if f.units == 0 {
            return Err(ConfigError::new("fleet.units", "must be > 0"));
        }
        if f.max_capacity <= 0.0 {
            return Err(ConfigError::new("fleet.max_capacity", "must be > 0"));
        }
        if f.max_charge_rate < 0.0 {
            return Err(ConfigError::new("fleet.max_charge_rate", "must be >= 0"));
        }
        if f.max_discharge_rate > 0.0 {
            return Err(ConfigError::new("fleet.max_discharge_rate", "must be <= 0"));
        }
        if f.walk_sigma < 0.0 {
            return Err(ConfigError::new("fleet.walk_sigma", "must be >= 0"));
        }

        if self.household.forecast_window == 0 {
            return Err(ConfigError::new("household.forecast_window", "must be > 0"));
        }

        Ok(())
    }
}

/// Built-in 24-row household demand profile used when no schedule file is
/// configured: overnight base, a morning ramp, and an evening peak. Columns
/// are `(target, uncertainty, ability_to_flex)` per hour.
pub fn default_household_profile() -> Vec<ScheduleRow> {
    const PROFILE: [(f32, f32, f32); 24] = [
        (0.3, 0.1, 0.1), // 00
        (0.3, 0.1, 0.1),
        (0.3, 0.1, 0.1),
        (0.3, 0.1, 0.1),
        (0.4, 0.1, 0.1),
        (0.6, 0.2, 0.2),
        (1.2, 0.3, 0.3), // 06 morning ramp
        (1.8, 0.4, 0.4),
        (1.5, 0.3, 0.4),
        (0.9, 0.2, 0.3),
        (0.8, 0.2, 0.3),
        (0.8, 0.2, 0.3),
        (1.0, 0.2, 0.3), // 12
        (0.9, 0.2, 0.3),
        (0.8, 0.2, 0.3),
        (0.9, 0.2, 0.3),
        (1.2, 0.3, 0.4),
        (2.0, 0.4, 0.5), // 17 evening peak
        (2.4, 0.5, 0.5),
        (2.2, 0.4, 0.5),
        (1.8, 0.3, 0.4),
        (1.2, 0.3, 0.3),
        (0.8, 0.2, 0.2),
        (0.5, 0.1, 0.1), // 23
    ];

    PROFILE
        .iter()
        .map(|&(target, uncertainty, ability_to_flex)| ScheduleRow {
            target,
            uncertainty,
            ability_to_flex,
        })
        .collect()
}
