//! Energy-storage fleet simulator: physically-constrained battery units,
//! greedy multi-unit dispatch, and threshold-based charge control.

pub mod config;
pub mod devices;
pub mod diag;
pub mod forecast;
pub mod reporting;
pub mod runner;
/// Simulation core: dispatch, control, timing, and KPI modules.
pub mod sim;
pub mod telemetry;
