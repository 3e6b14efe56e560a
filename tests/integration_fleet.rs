//! Integration tests for the fleet-dispatch scenario.

mod common;

use std::time::Duration;

use bess_sim::diag::{MemorySink, NullSink};
use bess_sim::runner::run_fleet;
use bess_sim::sim::FleetDispatcher;
use bess_sim::telemetry::write_fleet_csv;

const HOUR: Duration = Duration::from_secs(3600);

#[test]
fn full_run_keeps_every_unit_within_bounds() {
    let config = common::short_fleet_config();
    let result = run_fleet(&config, &mut NullSink);

    for unit in &result.fleet {
        for &capacity in unit.capacity_history() {
            assert!(
                (0.0..=unit.max_capacity).contains(&capacity),
                "unit {} left bounds: {capacity}",
                unit.id
            );
        }
    }
}

#[test]
fn residual_accounts_for_everything_the_fleet_realized() {
    let config = common::short_fleet_config();
    let result = run_fleet(&config, &mut NullSink);

    for t in 0..result.demand_history.len() {
        let realized: f32 = result.fleet.iter().map(|unit| unit.history()[t]).sum();
        let expected = result.demand_history[t] - realized;
        assert!(
            (result.residual_history[t] - expected).abs() < 1e-4,
            "step {t}: residual {} != demand - realized {expected}",
            result.residual_history[t]
        );
    }
}

#[test]
fn histories_stay_aligned_across_the_run() {
    let config = common::short_fleet_config();
    let result = run_fleet(&config, &mut NullSink);

    let total = config.simulation.steps_per_day * config.simulation.days;
    assert_eq!(result.demand_history.len(), total);
    assert_eq!(result.residual_history.len(), total);
    for unit in &result.fleet {
        assert_eq!(unit.history().len(), total);
        assert_eq!(unit.capacity_history().len(), total);
    }
}

#[test]
fn identical_seeds_reproduce_the_run() {
    let config = common::short_fleet_config();
    let a = run_fleet(&config, &mut NullSink);
    let b = run_fleet(&config, &mut NullSink);

    assert_eq!(a.demand_history, b.demand_history);
    assert_eq!(a.residual_history, b.residual_history);

    let mut seeded = common::short_fleet_config();
    seeded.simulation.seed = 1234;
    let c = run_fleet(&seeded, &mut NullSink);
    assert_ne!(a.demand_history, c.demand_history);
}

#[test]
fn saturated_units_report_hit_limits() {
    // A fleet of full units offered a large charge request must reject it
    // and say so through the diagnostic sink.
    let mut fleet: Vec<_> = (0..3)
        .map(|id| {
            bess_sim::devices::BatteryUnit::new(100.0, 100.0, 10.0, -10.0).with_id(id)
        })
        .collect();

    let mut sink = MemorySink::new();
    FleetDispatcher.dispatch(&mut fleet, 5.0, HOUR, &mut sink);
    assert!(sink.contains(log::Level::Debug, "hit limit"));
    for unit in &fleet {
        assert_eq!(unit.history(), &[0.0]);
    }
}

#[test]
fn exported_telemetry_matches_run_shape() {
    let config = common::short_fleet_config();
    let result = run_fleet(&config, &mut NullSink);

    let mut buffer = Vec::new();
    write_fleet_csv(&result, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 1 + result.demand_history.len());
    let columns = lines[0].split(',').count();
    assert_eq!(columns, 3 + config.fleet.units);
}

#[test]
fn dispatch_order_depends_on_demand_sign() {
    let mut fleet = common::graded_fleet();
    FleetDispatcher.dispatch(&mut fleet, -20.0, HOUR, &mut NullSink);
    let order: Vec<usize> = fleet.iter().map(|u| u.id).collect();
    assert_eq!(order, vec![0, 1, 2]);

    let mut fleet = common::graded_fleet();
    FleetDispatcher.dispatch(&mut fleet, 20.0, HOUR, &mut NullSink);
    let order: Vec<usize> = fleet.iter().map(|u| u.id).collect();
    assert_eq!(order, vec![2, 1, 0]);
}
