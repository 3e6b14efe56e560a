//! Stdout summaries printed by the binary after a run.

use crate::runner::{FleetRunResult, HouseholdRunResult, SingleRunResult};
use crate::sim::kpi::KpiReport;

/// Prints the fleet summary: every unit's final state and the residual KPIs.
pub fn print_fleet_report(result: &FleetRunResult) {
    println!("\n--- Fleet Report ---");
    println!("demand source: {}", result.demand_source);
    let mut units: Vec<_> = result.fleet.iter().collect();
    units.sort_by_key(|unit| unit.id);
    for unit in units {
        println!("{unit}");
    }
    println!("residual: {}", KpiReport::from_series(&result.residual_history));
}

/// Prints the household summary: battery state, threshold, and grid KPIs.
pub fn print_household_report(result: &HouseholdRunResult) {
    println!("\n--- Household Report ---");
    println!("demand source: {}", result.demand_source);
    println!("{}", result.battery);
    println!("threshold: {}", KpiReport::from_series(&result.threshold_history));
    println!("grid: {}", KpiReport::from_series(&result.grid_history));
}

/// Prints the single-battery summary over its realized prosumption.
pub fn print_single_report(result: &SingleRunResult) {
    println!("\n--- Battery Report ---");
    println!("{}", result.battery);
    println!("prosumption: {}", KpiReport::from_series(result.battery.history()));
}
