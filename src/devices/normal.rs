//! Flat-level prosumption source with Gaussian noise.

use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};

use super::types::gaussian_noise;

/// A prosumer operating at a controllable flat level with Gaussian noise.
///
/// Might represent a dimmable streetlight, a variable speed drive, or some
/// other controllable load; steer it by setting `mean`. Samples are drawn at
/// a fixed `resolution`, so uncertainty accumulates correctly over longer
/// windows even though the expectation is just `mean` per sample.
#[derive(Debug, Clone)]
pub struct NormalProsumer {
    /// Controllable operating level.
    pub mean: f32,

    /// Standard deviation of the per-sample noise.
    pub stdev: f32,

    /// Sampling resolution; one sample per whole resolution interval.
    pub resolution: Duration,

    rng: StdRng,
}

impl NormalProsumer {
    /// Creates a new source.
    ///
    /// # Panics
    ///
    /// Panics if `resolution` is zero.
    pub fn new(mean: f32, stdev: f32, resolution: Duration, seed: u64) -> Self {
        assert!(!resolution.is_zero());

        Self {
            mean,
            stdev,
            resolution,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of samples covering `window` at this source's resolution.
    fn n_steps(&self, window: Duration) -> usize {
        (window.as_secs() / self.resolution.as_secs()) as usize
    }

    /// Draws one noisy sample per resolution interval of `window`.
    pub fn prosumption(&mut self, window: Duration) -> Vec<f32> {
        (0..self.n_steps(window))
            .map(|_| self.mean + gaussian_noise(&mut self.rng, self.stdev))
            .collect()
    }

    /// Total expected-plus-noise prosumption over `window`.
    pub fn prediction(&mut self, window: Duration) -> f32 {
        self.prosumption(window).iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn sample_count_tracks_resolution() {
        let mut source = NormalProsumer::new(1.0, 0.0, HOUR, 0);
        assert_eq!(source.prosumption(4 * HOUR).len(), 4);
        assert_eq!(source.prosumption(Duration::from_secs(1800)).len(), 0);
    }

    #[test]
    fn noiseless_source_is_exact() {
        let mut source = NormalProsumer::new(2.5, 0.0, HOUR, 0);
        assert_eq!(source.prosumption(3 * HOUR), vec![2.5, 2.5, 2.5]);
        assert_eq!(source.prediction(2 * HOUR), 5.0);
    }

    #[test]
    fn mean_is_controllable() {
        let mut source = NormalProsumer::new(1.0, 0.0, HOUR, 0);
        source.mean = -4.0;
        assert_eq!(source.prediction(HOUR), -4.0);
    }

    #[test]
    #[should_panic]
    fn zero_resolution_panics() {
        NormalProsumer::new(1.0, 0.1, Duration::ZERO, 0);
    }
}
