//! Shared test fixtures for integration tests.

use bess_sim::config::ScenarioConfig;
use bess_sim::devices::BatteryUnit;

/// Fleet preset trimmed to a single simulated day.
pub fn short_fleet_config() -> ScenarioConfig {
    let mut config = ScenarioConfig::fleet();
    config.simulation.days = 1;
    config
}

/// Household preset trimmed to two simulated days.
pub fn short_household_config() -> ScenarioConfig {
    let mut config = ScenarioConfig::household();
    config.simulation.days = 2;
    config
}

/// Single-battery preset over one simulated week.
pub fn short_single_config() -> ScenarioConfig {
    ScenarioConfig::single()
}

/// Deterministic three-unit fleet with known capacities (10, 50, 90 of 100).
pub fn graded_fleet() -> Vec<BatteryUnit> {
    [10.0, 50.0, 90.0]
        .iter()
        .enumerate()
        .map(|(id, &capacity)| BatteryUnit::new(100.0, capacity, 10.0, -10.0).with_id(id))
        .collect()
}
