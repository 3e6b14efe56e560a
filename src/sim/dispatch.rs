//! Greedy sequential fleet dispatch.

use std::time::Duration;

use crate::devices::BatteryUnit;
use crate::diag::DiagnosticSink;

/// Greedy, rank-ordered, winner-take-residual fleet dispatcher.
///
/// One dispatch pass routes a single aggregate demand value across the
/// fleet: the fleet is re-sorted by a sign-dependent priority key, then each
/// unit in turn is offered the entire residual demand and steps once, with
/// its realized prosumption subtracted before the next unit is offered.
///
/// This concentrates activity on the unit best positioned to act and leaves
/// the rest as reserve. It converges in one pass per step and gives no
/// fairness or optimality guarantee: a unit early in the sorted order may
/// absorb everything, starving later units.
#[derive(Debug, Default, Clone, Copy)]
pub struct FleetDispatcher;

impl FleetDispatcher {
    /// Dispatches `aggregate_demand` across the fleet for one step.
    ///
    /// Sort key by demand sign:
    /// - `aggregate_demand < 0`: ascending stored energy, emptiest first;
    /// - `aggregate_demand >= 0`: ascending reservoir, fullest first.
    ///
    /// Each unit is offered the entire residual (`current_rate = remaining`),
    /// not a fair share, and its realized total is subtracted before the
    /// next unit is offered. Units are processed strictly in sorted order;
    /// the pass re-orders `fleet` in place, so unit `id` carries identity
    /// for reporting.
    ///
    /// # Returns
    ///
    /// The residual, `aggregate_demand` minus everything the fleet realized.
    pub fn dispatch(
        &self,
        fleet: &mut [BatteryUnit],
        aggregate_demand: f32,
        step_duration: Duration,
        diag: &mut dyn DiagnosticSink,
    ) -> f32 {
        if aggregate_demand < 0.0 {
            fleet.sort_by(|a, b| a.capacity().total_cmp(&b.capacity()));
        } else {
            fleet.sort_by(|a, b| a.reservoir().total_cmp(&b.reservoir()));
        }

        let mut remaining = aggregate_demand;
        for unit in fleet.iter_mut() {
            unit.current_rate = remaining;
            let realized = unit.step(step_duration, diag);
            remaining -= realized.iter().sum::<f32>();
        }
        remaining
    }
}
