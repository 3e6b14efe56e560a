//! Stationary battery storage state machine.

use std::fmt;
use std::time::Duration;

use log::Level;

use crate::diag::DiagnosticSink;
use crate::forecast::PredictionEngine;

/// An energy-storage unit that absorbs or supplies power to smooth demand.
///
/// `BatteryUnit` owns its capacity and rate state and advances by exactly
/// one fixed time step per [`BatteryUnit::step`] call. Stored energy is kept
/// within `[0, max_capacity]` at the end of every completed step.
///
/// # Prosumption Convention
/// - Positive realized rate: discharging (draining, positive prosumption)
/// - Negative realized rate: charging (absorbing surplus)
///
/// The *requested* rate in `current_rate` is unbounded; it is clamped and
/// sign-inverted by [`BatteryUnit::actual_rate`], never rejected at set time.
#[derive(Debug, Clone)]
pub struct BatteryUnit {
    /// Stable identity for reporting; independent of fleet sort order.
    pub id: usize,

    /// Upper bound on stored energy (constant).
    pub max_capacity: f32,

    /// Largest charging power magnitude allowed (>= 0).
    pub max_charge_rate: f32,

    /// Largest discharging power, expressed as a non-positive number.
    pub max_discharge_rate: f32,

    /// Requested rate for the next step; set externally before stepping.
    pub current_rate: f32,

    /// Current stored energy; mutated only by `step`.
    capacity: f32,

    /// Cumulative simulated time.
    elapsed: Duration,

    /// Realized total prosumption per completed step, append-only.
    history: Vec<f32>,

    /// Stored energy after each completed step, append-only.
    capacity_history: Vec<f32>,
}

impl BatteryUnit {
    /// Creates a new unit with the given constant parameters and initial
    /// stored energy.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Upper bound on stored energy (must be > 0)
    /// * `capacity` - Initial stored energy (within `[0, max_capacity]`)
    /// * `max_charge_rate` - Maximum charging power (>= 0)
    /// * `max_discharge_rate` - Maximum discharging power (<= 0)
    ///
    /// # Panics
    ///
    /// Panics if `max_capacity` is zero/negative, the initial capacity is
    /// out of bounds, or either rate limit has the wrong sign.
    pub fn new(
        max_capacity: f32,
        capacity: f32,
        max_charge_rate: f32,
        max_discharge_rate: f32,
    ) -> Self {
        assert!(max_capacity > 0.0);
        assert!((0.0..=max_capacity).contains(&capacity));
        assert!(max_charge_rate >= 0.0);
        assert!(max_discharge_rate <= 0.0);

        Self {
            id: 0,
            max_capacity,
            max_charge_rate,
            max_discharge_rate,
            current_rate: 0.0,
            capacity,
            elapsed: Duration::ZERO,
            history: Vec::new(),
            capacity_history: Vec::new(),
        }
    }

    /// Tags the unit with a stable reporting identity.
    pub fn with_id(mut self, id: usize) -> Self {
        self.id = id;
        self
    }

    /// Returns the current stored energy.
    pub fn capacity(&self) -> f32 {
        self.capacity
    }

    /// Returns cumulative simulated time across all completed steps.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns the realized total prosumption of each completed step.
    pub fn history(&self) -> &[f32] {
        &self.history
    }

    /// Returns the stored energy after each completed step.
    ///
    /// Always index-aligned with [`BatteryUnit::history`].
    pub fn capacity_history(&self) -> &[f32] {
        &self.capacity_history
    }

    /// Returns the physically realizable rate for the requested one.
    ///
    /// `-clamp(current_rate, max_discharge_rate, max_charge_rate)`: the
    /// negation flips the request into prosumption convention, so asking for
    /// `max_charge_rate` realizes as negative (charging) prosumption and
    /// asking for `max_discharge_rate` realizes as positive (discharging).
    pub fn actual_rate(&self) -> f32 {
        -self
            .current_rate
            .clamp(self.max_discharge_rate, self.max_charge_rate)
    }

    /// Returns `1 - capacity / max_capacity`.
    ///
    /// The formula is load-bearing as written: the threshold control law
    /// multiplies by exactly this quantity. It moves opposite to stored
    /// energy despite the name; keep the formula, not the name's reading.
    pub fn percent_full(&self) -> f32 {
        1.0 - self.capacity / self.max_capacity
    }

    /// Returns the unused headroom, `max_capacity - capacity`.
    pub fn reservoir(&self) -> f32 {
        self.max_capacity - self.capacity
    }

    /// Requests the strongest charging rate for the next step.
    pub fn charge(&mut self) {
        self.current_rate = self.max_charge_rate;
    }

    /// Requests the strongest discharging rate for the next step.
    pub fn discharge(&mut self) {
        self.current_rate = self.max_discharge_rate;
    }

    /// Forecasts per-hour prosumption over `horizon` at the current rate.
    ///
    /// Pure what-if query; see [`PredictionEngine::predict`] for the
    /// granularity and clipping rules.
    pub fn prediction(&self, horizon: Duration) -> Vec<f32> {
        PredictionEngine::predict(self.actual_rate(), horizon, self.capacity)
    }

    /// Advances the unit by one time step; the only mutator.
    ///
    /// Integrates the forecast prosumption into stored energy. When the
    /// committed step would push stored energy outside `[0, max_capacity]`,
    /// the requested rate is overridden to zero for the whole step and
    /// capacity is left unchanged: a hard clamp, not a partial fill. The
    /// override is reported to `diag` at debug level, never as an error.
    ///
    /// Appends the realized total and the resulting capacity to the two
    /// history sequences, keeping them index-aligned.
    ///
    /// # Returns
    ///
    /// The realized per-hour prosumption for this step.
    pub fn step(&mut self, step_duration: Duration, diag: &mut dyn DiagnosticSink) -> Vec<f32> {
        self.elapsed += step_duration;

        let mut planned = self.prediction(step_duration);
        let total: f32 = planned.iter().sum();
        let would_be_capacity = self.capacity - total;

        if (0.0..=self.max_capacity).contains(&would_be_capacity) {
            self.capacity = would_be_capacity;
        } else {
            diag.record(Level::Debug, "hit limit");
            self.current_rate = 0.0;
            planned = self.prediction(step_duration);
        }

        self.history.push(planned.iter().sum());
        self.capacity_history.push(self.capacity);
        planned
    }
}

impl fmt::Display for BatteryUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BatteryUnit#{}({:?}, {:.0}% ({:+.02}))",
            self.id,
            self.elapsed,
            self.percent_full() * 100.0,
            self.actual_rate(),
        )
    }
}
