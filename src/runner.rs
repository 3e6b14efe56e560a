//! Scenario runners wiring demand sources, controllers, and storage.

use std::io;
use std::path::Path;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::{ScenarioConfig, default_household_profile};
use crate::devices::{BatteryUnit, Prosumer, RandomWalk, ScheduleProsumer};
use crate::diag::DiagnosticSink;
use crate::sim::{FleetDispatcher, SimConfig, ThresholdController};

/// Seed offset for the household schedule RNG to avoid correlation with
/// other stochastic components.
const SCHEDULE_SEED_OFFSET: u64 = 31;

/// Complete record of a fleet-dispatch run.
pub struct FleetRunResult {
    /// Type name of the demand source that drove the run.
    pub demand_source: &'static str,
    /// The fleet after the final step, in final sort order.
    pub fleet: Vec<BatteryUnit>,
    /// Aggregate demand offered to the fleet per step.
    pub demand_history: Vec<f32>,
    /// Residual demand after each dispatch pass.
    pub residual_history: Vec<f32>,
}

/// Complete record of a household run under threshold control.
pub struct HouseholdRunResult {
    /// Type name of the demand source that drove the run.
    pub demand_source: &'static str,
    /// The battery after the final step.
    pub battery: BatteryUnit,
    /// Realized household prosumption per step.
    pub household_history: Vec<f32>,
    /// Controller threshold per step.
    pub threshold_history: Vec<f32>,
    /// Grid balance per step, `-(household + battery)`.
    pub grid_history: Vec<f32>,
    /// Battery fill ratio (`percent_full`) per step.
    pub charge_history: Vec<f32>,
}

/// Complete record of a single self-driven battery run.
pub struct SingleRunResult {
    /// The battery after the final step; its histories are the record.
    pub battery: BatteryUnit,
}

/// Builds the randomized fleet for the multi-unit scenario.
///
/// Every unit shares `max_capacity`; initial capacity and both rate limits
/// are drawn uniformly below the configured maxima, so the fleet spans a
/// range of sizes and strengths. Deterministic for a fixed seed.
pub fn build_fleet(config: &ScenarioConfig) -> Vec<BatteryUnit> {
    let f = &config.fleet;
    let mut rng = StdRng::seed_from_u64(config.simulation.seed);

    (0..f.units)
        .map(|id| {
            let capacity = rng.random::<f32>() * f.max_capacity;
            let charge = rng.random::<f32>() * f.max_charge_rate;
            let discharge = rng.random::<f32>() * f.max_discharge_rate;
            BatteryUnit::new(f.max_capacity, capacity, charge, discharge).with_id(id)
        })
        .collect()
}

/// Runs the fleet scenario: a random-walk aggregate demand dispatched
/// greedily across the fleet, one step at a time.
pub fn run_fleet(config: &ScenarioConfig, diag: &mut dyn DiagnosticSink) -> FleetRunResult {
    let sim = SimConfig::new(
        config.simulation.steps_per_day,
        config.simulation.days,
        config.simulation.seed,
    );
    let step_duration = sim.step_duration();

    let mut fleet = build_fleet(config);
    let mut walk = RandomWalk::new(config.fleet.walk_sigma, sim.seed);
    let dispatcher = FleetDispatcher;

    let total = sim.total_steps();
    let mut demand_history = Vec::with_capacity(total);
    let mut residual_history = Vec::with_capacity(total);

    for _ in 0..total {
        let demand = walk.next_value();
        let residual = dispatcher.dispatch(&mut fleet, demand, step_duration, diag);
        demand_history.push(demand);
        residual_history.push(residual);
    }

    FleetRunResult {
        demand_source: walk.prosumer_type(),
        fleet,
        demand_history,
        residual_history,
    }
}

/// Runs the household scenario: scheduled demand smoothed by one battery
/// under the threshold controller.
///
/// # Errors
///
/// Returns an `io::Error` when a configured schedule file cannot be loaded.
pub fn run_household(
    config: &ScenarioConfig,
    diag: &mut dyn DiagnosticSink,
) -> io::Result<HouseholdRunResult> {
    let sim = SimConfig::new(
        config.simulation.steps_per_day,
        config.simulation.days,
        config.simulation.seed,
    );
    let step_duration = sim.step_duration();

    let b = &config.battery;
    let mut battery = BatteryUnit::new(
        b.max_capacity,
        b.initial_capacity,
        b.max_charge_rate,
        b.max_discharge_rate,
    );

    let schedule_seed = sim.seed.wrapping_add(SCHEDULE_SEED_OFFSET);
    let mut household = match &config.household.schedule_path {
        Some(path) => ScheduleProsumer::from_path(Path::new(path), schedule_seed)?,
        None => ScheduleProsumer::from_rows(default_household_profile(), schedule_seed),
    };

    let controller = ThresholdController;
    let window = config.household.forecast_window;

    let total = sim.total_steps();
    let mut household_history = Vec::with_capacity(total);
    let mut threshold_history = Vec::with_capacity(total);
    let mut grid_history = Vec::with_capacity(total);
    let mut charge_history = Vec::with_capacity(total);

    for _ in 0..total {
        let demand = household.next_value();

        let forecast_mean =
            household.prediction(window).iter().sum::<f32>() / window as f32;
        let threshold = controller.compute_rate(&mut battery, forecast_mean, demand);

        let realized: f32 = battery.step(step_duration, diag).iter().sum();

        household_history.push(demand);
        threshold_history.push(threshold);
        // The grid balances whatever household and battery leave over.
        grid_history.push(-(demand + realized));
        charge_history.push(battery.percent_full());
    }

    Ok(HouseholdRunResult {
        demand_source: household.prosumer_type(),
        battery,
        household_history,
        threshold_history,
        grid_history,
        charge_history,
    })
}

/// Runs the single-battery scenario: each step requests the previous
/// realized rate perturbed by uniform noise, wandering between the unit's
/// limits.
pub fn run_single(config: &ScenarioConfig, diag: &mut dyn DiagnosticSink) -> SingleRunResult {
    let sim = SimConfig::new(
        config.simulation.steps_per_day,
        config.simulation.days,
        config.simulation.seed,
    );
    let step_duration = sim.step_duration();

    let b = &config.battery;
    let mut battery = BatteryUnit::new(
        b.max_capacity,
        b.initial_capacity,
        b.max_charge_rate,
        b.max_discharge_rate,
    );
    let mut rng = StdRng::seed_from_u64(sim.seed);

    for _ in 0..sim.total_steps() {
        battery.current_rate = battery.actual_rate() + (rng.random::<f32>() - 0.5);
        battery.step(step_duration, diag);
    }

    SingleRunResult { battery }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::NullSink;

    #[test]
    fn build_fleet_is_seeded_and_tagged() {
        let config = ScenarioConfig::fleet();
        let a = build_fleet(&config);
        let b = build_fleet(&config);
        assert_eq!(a.len(), config.fleet.units);
        for (unit_a, unit_b) in a.iter().zip(&b) {
            assert_eq!(unit_a.id, unit_b.id);
            assert_eq!(unit_a.capacity(), unit_b.capacity());
            assert_eq!(unit_a.max_charge_rate, unit_b.max_charge_rate);
        }
        let ids: Vec<usize> = a.iter().map(|u| u.id).collect();
        assert_eq!(ids, (0..config.fleet.units).collect::<Vec<_>>());
    }

    #[test]
    fn fleet_run_produces_aligned_series() {
        let mut config = ScenarioConfig::fleet();
        config.simulation.days = 1;
        let result = run_fleet(&config, &mut NullSink);

        let total = config.simulation.steps_per_day;
        assert_eq!(result.demand_history.len(), total);
        assert_eq!(result.residual_history.len(), total);
        for unit in &result.fleet {
            assert_eq!(unit.history().len(), total);
            assert_eq!(unit.capacity_history().len(), total);
            assert!((0.0..=unit.max_capacity).contains(&unit.capacity()));
        }
    }

    #[test]
    fn household_run_produces_aligned_series() {
        let mut config = ScenarioConfig::household();
        config.simulation.days = 2;
        let result = run_household(&config, &mut NullSink).unwrap();

        let total = 2 * config.simulation.steps_per_day;
        assert_eq!(result.household_history.len(), total);
        assert_eq!(result.threshold_history.len(), total);
        assert_eq!(result.grid_history.len(), total);
        assert_eq!(result.charge_history.len(), total);
        assert_eq!(result.battery.history().len(), total);
        assert!((0.0..=result.battery.max_capacity).contains(&result.battery.capacity()));
    }

    #[test]
    fn household_grid_balances_each_step() {
        let mut config = ScenarioConfig::household();
        config.simulation.days = 1;
        let result = run_household(&config, &mut NullSink).unwrap();

        for (i, grid) in result.grid_history.iter().enumerate() {
            let expected = -(result.household_history[i] + result.battery.history()[i]);
            assert!((grid - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn single_run_respects_capacity_bounds() {
        let mut config = ScenarioConfig::single();
        config.simulation.days = 30;
        let result = run_single(&config, &mut NullSink);

        let total = 30 * config.simulation.steps_per_day;
        assert_eq!(result.battery.history().len(), total);
        for &capacity in result.battery.capacity_history() {
            assert!((0.0..=result.battery.max_capacity).contains(&capacity));
        }
    }

    #[test]
    fn run_results_name_their_demand_source() {
        let mut fleet_config = ScenarioConfig::fleet();
        fleet_config.simulation.days = 1;
        let fleet_result = run_fleet(&fleet_config, &mut NullSink);
        assert_eq!(fleet_result.demand_source, "RandomWalk");

        let mut household_config = ScenarioConfig::household();
        household_config.simulation.days = 1;
        let household_result = run_household(&household_config, &mut NullSink).unwrap();
        assert_eq!(household_result.demand_source, "Schedule");
    }

    #[test]
    fn missing_schedule_file_surfaces_as_error() {
        let mut config = ScenarioConfig::household();
        config.household.schedule_path = Some("does/not/exist.txt".to_string());
        assert!(run_household(&config, &mut NullSink).is_err());
    }
}
