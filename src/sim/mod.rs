//! Simulation core: dispatch, control, timing, and KPIs.

/// Threshold feedback controller.
pub mod controller;
/// Greedy sequential fleet dispatch.
pub mod dispatch;
/// Post-hoc KPI computation.
pub mod kpi;
pub mod types;

pub use controller::ThresholdController;
pub use dispatch::FleetDispatcher;
pub use kpi::KpiReport;
pub use types::SimConfig;
