//! Common types and traits for demand-source components.

use rand::{Rng, rngs::StdRng};

/// Trait defining a lazy, infinite, non-restartable prosumption source.
///
/// A prosumer yields one net power value per simulation step: positive
/// values drain (discharge-positive prosumption), negative values supply
/// surplus to absorb. There is no way to replay a source; it just keeps
/// going, growing its history as it is consumed.
pub trait Prosumer {
    /// Yields the prosumption value for the next step.
    fn next_value(&mut self) -> f32;

    /// Returns every value produced so far, oldest first.
    fn history(&self) -> &[f32];

    /// Returns a human-readable type name for the source.
    fn prosumer_type(&self) -> &'static str;
}

/// Utility function to generate Gaussian noise using Box-Muller transform.
///
/// # Arguments
///
/// * `rng` - Random number generator
/// * `std_dev` - Standard deviation of the noise
///
/// # Returns
///
/// Random value from a Gaussian distribution with mean 0 and specified standard deviation
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f32) -> f32 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f32 = rng.random::<f32>().clamp(1e-6, 1.0);
    let u2: f32 = rng.random::<f32>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
    z0 * std_dev
}
