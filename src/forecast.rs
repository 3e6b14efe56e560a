//! Constant-rate prosumption forecasting.

use std::time::Duration;

/// Seconds per forecast subinterval; the engine forecasts in whole hours.
const SUBINTERVAL_SECS: u64 = 3600;

/// Constant-rate forecast engine for a single storage unit.
///
/// The forecast is a pure read of `(rate, horizon, capacity)`: it performs
/// no mutation and may be called for what-if queries outside of stepping.
#[derive(Debug, Default, Clone, Copy)]
pub struct PredictionEngine;

impl PredictionEngine {
    /// Produces the per-hour prosumption forecast over `horizon`.
    ///
    /// The sequence has `floor(horizon_seconds / 3600)` entries, each equal
    /// to `rate`; a horizon under one hour yields an empty forecast. Any
    /// entry strictly greater than `capacity` is zeroed.
    ///
    /// The clip compares each instantaneous entry against the stored-energy
    /// quantity on its own, not as a running total. Callers rely on this
    /// exact per-entry comparison; do not change it to a cumulative check.
    ///
    /// # Arguments
    ///
    /// * `rate` - Realized prosumption rate (positive = discharge)
    /// * `horizon` - Forecast horizon, discretized into one-hour subintervals
    /// * `capacity` - Stored energy used by the clip
    ///
    /// # Returns
    ///
    /// One prosumption value per whole hour of `horizon`.
    pub fn predict(rate: f32, horizon: Duration, capacity: f32) -> Vec<f32> {
        let count = (horizon.as_secs() / SUBINTERVAL_SECS) as usize;
        let mut result = vec![rate; count];
        for entry in &mut result {
            if *entry > capacity {
                *entry = 0.0;
            }
        }
        result
    }
}
