//! Random-walk prosumption source.

use rand::{SeedableRng, rngs::StdRng};

use super::types::{Prosumer, gaussian_noise};

/// A Gaussian random-walk prosumer.
///
/// Represents the challenge of a drifting prosumption landscape: each yield
/// returns the walk's current position, then takes one Gaussian step of
/// standard deviation `sigma`. The walk starts at zero and its history grows
/// without bound; there is no way to replay it.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    /// Standard deviation of one walk increment.
    pub sigma: f32,

    history: Vec<f32>,
    rng: StdRng,
}

impl RandomWalk {
    /// Creates a new walk starting at zero.
    ///
    /// # Arguments
    ///
    /// * `sigma` - Standard deviation of each increment
    /// * `seed` - Random seed for reproducible walks
    pub fn new(sigma: f32, seed: u64) -> Self {
        Self {
            sigma,
            history: vec![0.0],
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Prosumer for RandomWalk {
    fn next_value(&mut self) -> f32 {
        let result = *self.history.last().unwrap_or(&0.0);
        let next = result + gaussian_noise(&mut self.rng, self.sigma);
        self.history.push(next);
        result
    }

    fn history(&self) -> &[f32] {
        &self.history
    }

    fn prosumer_type(&self) -> &'static str {
        "RandomWalk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_starts_at_zero() {
        let mut walk = RandomWalk::new(0.1, 42);
        assert_eq!(walk.next_value(), 0.0);
    }

    #[test]
    fn history_grows_one_entry_per_yield() {
        let mut walk = RandomWalk::new(0.1, 42);
        assert_eq!(walk.history().len(), 1);
        for _ in 0..10 {
            walk.next_value();
        }
        assert_eq!(walk.history().len(), 11);
    }

    #[test]
    fn yield_returns_previous_position() {
        let mut walk = RandomWalk::new(0.5, 7);
        let first = walk.next_value();
        let second = walk.next_value();
        assert_eq!(first, 0.0);
        assert_eq!(second, walk.history()[1]);
    }

    #[test]
    fn same_seed_same_walk() {
        let mut a = RandomWalk::new(0.3, 99);
        let mut b = RandomWalk::new(0.3, 99);
        for _ in 0..20 {
            assert_eq!(a.next_value(), b.next_value());
        }
    }

    #[test]
    fn zero_sigma_walk_stays_flat() {
        let mut walk = RandomWalk::new(0.0, 1);
        for _ in 0..5 {
            assert_eq!(walk.next_value(), 0.0);
        }
    }
}
