//! Core simulation types: timing configuration.

use std::time::Duration;

/// Centralized simulation configuration.
///
/// Scenario runners and devices reference this struct for timing
/// parameters, eliminating duplicated step-duration computations.
///
/// # Examples
///
/// ```
/// use bess_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(24, 1, 42);
/// assert_eq!(cfg.dt_hours, 1.0);
/// assert_eq!(cfg.total_steps(), 24);
/// ```
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation steps per day.
    pub steps_per_day: usize,
    /// Number of days to simulate.
    pub days: usize,
    /// Duration of one timestep in hours, derived as `24.0 / steps_per_day`.
    pub dt_hours: f32,
    /// Master random seed for reproducibility.
    pub seed: u64,
}

impl SimConfig {
    /// Creates a new simulation configuration.
    ///
    /// # Arguments
    ///
    /// * `steps_per_day` - Number of timesteps per simulated day (must be > 0)
    /// * `days` - Number of days to simulate (must be > 0)
    /// * `seed` - Master random seed
    ///
    /// # Panics
    ///
    /// Panics if `steps_per_day` or `days` is zero.
    pub fn new(steps_per_day: usize, days: usize, seed: u64) -> Self {
        assert!(steps_per_day > 0, "steps_per_day must be > 0");
        assert!(days > 0, "days must be > 0");
        Self {
            steps_per_day,
            days,
            dt_hours: 24.0 / steps_per_day as f32,
            seed,
        }
    }

    /// Total number of simulation steps across all days.
    pub fn total_steps(&self) -> usize {
        self.steps_per_day * self.days
    }

    /// Duration of one timestep.
    ///
    /// The reference scenarios run hourly (`steps_per_day = 24`), matching
    /// the one-hour forecast granularity.
    pub fn step_duration(&self) -> Duration {
        Duration::from_secs((self.dt_hours * 3600.0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_config_basic() {
        let cfg = SimConfig::new(24, 1, 42);
        assert_eq!(cfg.steps_per_day, 24);
        assert_eq!(cfg.days, 1);
        assert_eq!(cfg.dt_hours, 1.0);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.total_steps(), 24);
        assert_eq!(cfg.step_duration(), Duration::from_secs(3600));
    }

    #[test]
    fn sim_config_multi_day() {
        let cfg = SimConfig::new(12, 3, 0);
        assert_eq!(cfg.total_steps(), 36);
        assert_eq!(cfg.dt_hours, 2.0);
        assert_eq!(cfg.step_duration(), Duration::from_secs(7200));
    }

    #[test]
    #[should_panic]
    fn sim_config_zero_steps_panics() {
        SimConfig::new(0, 1, 0);
    }

    #[test]
    #[should_panic]
    fn sim_config_zero_days_panics() {
        SimConfig::new(24, 0, 0);
    }
}
