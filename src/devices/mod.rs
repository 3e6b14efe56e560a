//! Device components: storage units and demand-signal sources.

/// Stationary battery storage model.
pub mod battery;
/// Flat-level prosumer with Gaussian noise.
pub mod normal;
/// Random-walk prosumer.
pub mod random_walk;
/// File/row-driven looping schedule prosumer.
pub mod schedule;
pub mod types;

// Re-export the main types for convenience
pub use battery::BatteryUnit;
pub use normal::NormalProsumer;
pub use random_walk::RandomWalk;
pub use schedule::{ScheduleProsumer, ScheduleRow};
pub use types::Prosumer;
