//! Seeded random source for Monte Carlo trials.
//!
//! Every trial owns an independent generator whose seed is derived from the
//! engine's base seed and the trial index. Results therefore do not depend
//! on the order trials run in, which is what makes the parallel loop
//! reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::{Result, VartestError};

/// Random number generator for simulations
#[derive(Debug, Clone)]
pub struct MonteCarloRng {
    rng: StdRng,
    seed: u64,
}

impl MonteCarloRng {
    /// Create a generator from an explicit seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Generator for trial `trial` of a run seeded with `base_seed`
    #[must_use]
    pub fn for_trial(base_seed: u64, trial: usize) -> Self {
        Self::new(trial_seed(base_seed, trial))
    }

    /// Seed this generator was created from
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw on `[0, 1)`
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// `n` independent draws from Normal(`mean`, `std`).
    ///
    /// # Errors
    ///
    /// Returns [`VartestError::InvalidParameter`] if `std` is negative or
    /// either parameter is not finite.
    pub fn normal_sample(&mut self, n: usize, mean: f64, std: f64) -> Result<Vec<f64>> {
        if !mean.is_finite() {
            return Err(VartestError::invalid_parameter("mean", mean, "a finite value"));
        }
        if !(std.is_finite() && std >= 0.0) {
            return Err(VartestError::invalid_parameter("std", std, "a finite value >= 0"));
        }
        let dist = Normal::new(mean, std)
            .map_err(|_| VartestError::invalid_parameter("std", std, "a finite value >= 0"))?;
        Ok((0..n).map(|_| dist.sample(&mut self.rng)).collect())
    }
}

/// Seed of trial `trial` in a run seeded with `base_seed`.
///
/// The trial index is mixed before combining so neighbouring trials and
/// neighbouring base seeds land far apart.
#[must_use]
pub fn trial_seed(base_seed: u64, trial: usize) -> u64 {
    splitmix64(base_seed ^ splitmix64(trial as u64))
}

// SplitMix64 finalizer (Steele, Lea & Flood 2014).
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
