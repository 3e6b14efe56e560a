//! Threshold feedback controller for a single storage unit.

use crate::devices::BatteryUnit;

/// Feedback controller deriving a rate setpoint from forecast demand.
///
/// The control law compares the current demand against a threshold that
/// scales with the unit's derived fill ratio: when demand sits below the
/// threshold the requested rate rises, and above it the request falls. It
/// consults no history beyond the unit's current derived state, so it is
/// stateless and idempotent for fixed inputs.
///
/// Any strategy that assigns `current_rate` before the unit steps satisfies
/// the same contract; the fleet dispatcher is one such alternative.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThresholdController;

impl ThresholdController {
    /// Computes the demand threshold for a unit.
    ///
    /// `forecast_mean_next_day * (percent_full * 2)`; the fill ratio here is
    /// [`BatteryUnit::percent_full`], whose formula moves opposite to stored
    /// energy. The product is relied on exactly as written.
    pub fn threshold(&self, forecast_mean_next_day: f32, percent_full: f32) -> f32 {
        forecast_mean_next_day * (percent_full * 2.0)
    }

    /// Assigns the unit's requested rate from current demand and forecast.
    ///
    /// Sets `current_rate = demand_now - threshold` and returns the
    /// threshold so callers can record it.
    pub fn compute_rate(
        &self,
        unit: &mut BatteryUnit,
        forecast_mean_next_day: f32,
        demand_now: f32,
    ) -> f32 {
        let threshold = self.threshold(forecast_mean_next_day, unit.percent_full());
        unit.current_rate = demand_now - threshold;
        threshold
    }
}

#[cfg(test)]
mod tests {
    use super::ThresholdController;
    use crate::devices::BatteryUnit;

    #[test]
    fn threshold_scales_with_fill_ratio() {
        let controller = ThresholdController;
        assert_eq!(controller.threshold(3.0, 0.5), 3.0);
        assert_eq!(controller.threshold(3.0, 0.0), 0.0);
        assert_eq!(controller.threshold(2.0, 1.0), 4.0);
    }

    #[test]
    fn rate_is_demand_minus_threshold() {
        let controller = ThresholdController;
        // capacity 25 of 100 gives percent_full 0.75, threshold 2*0.75*2 = 3.
        let mut unit = BatteryUnit::new(100.0, 25.0, 5.0, -5.0);
        let threshold = controller.compute_rate(&mut unit, 2.0, 5.0);
        assert!((threshold - 3.0).abs() < 1e-6);
        assert!((unit.current_rate - 2.0).abs() < 1e-6);
    }

    #[test]
    fn recomputation_is_idempotent_for_fixed_inputs() {
        let controller = ThresholdController;
        let mut unit = BatteryUnit::new(100.0, 40.0, 5.0, -5.0);
        let first = controller.compute_rate(&mut unit, 1.5, 0.75);
        let rate = unit.current_rate;
        let second = controller.compute_rate(&mut unit, 1.5, 0.75);
        assert_eq!(first, second);
        assert_eq!(unit.current_rate, rate);
    }

    #[test]
    fn demand_below_threshold_requests_negative_rate() {
        let controller = ThresholdController;
        let mut unit = BatteryUnit::new(100.0, 10.0, 5.0, -5.0);
        // percent_full 0.9, threshold 2 * 0.9 * 2 = 3.6; demand 1.0 sits below.
        controller.compute_rate(&mut unit, 2.0, 1.0);
        assert!((unit.current_rate - -2.6).abs() < 1e-6);
    }
}
