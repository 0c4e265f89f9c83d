//! Monte Carlo trial runner.
//!
//! [`MonteCarloEngine`] owns the base seed and decides whether trials run
//! sequentially or on the rayon thread pool. A trial is a closure that gets
//! its own [`MonteCarloRng`] and reports whether it rejected H₀; the engine
//! sums those indicators.

pub mod rng;
pub mod types;

pub use rng::{trial_seed, MonteCarloRng};
pub use types::{binomial_standard_error, AggregateEstimate, PowerEstimate};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{Result, VartestError};

/// Seeded runner for independent Monte Carlo trials.
///
/// # Example
///
/// ```
/// use vartest::monte_carlo::engine::MonteCarloEngine;
///
/// let engine = MonteCarloEngine::new(42);
/// let heads = engine
///     .count_rejections(1000, |_, rng| Ok(rng.uniform() < 0.5))
///     .expect("trials cannot fail");
/// assert!(heads > 400 && heads < 600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloEngine {
    seed: u64,
    parallel: bool,
}

impl MonteCarloEngine {
    /// Sequential engine with a fixed base seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            parallel: false,
        }
    }

    /// Engine seeded from the operating system's entropy source.
    ///
    /// The chosen seed is available through [`seed`](Self::seed) so the run
    /// can be repeated.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// Run trials on the rayon thread pool.
    ///
    /// Every trial is seeded from its index, so the counts are identical to
    /// a sequential run with the same seed.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Base seed
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether trials run in parallel
    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Run `n_trials` trials and count how many returned `true`.
    ///
    /// # Errors
    ///
    /// The first failing trial aborts the run with
    /// [`VartestError::TrialFailed`].
    pub fn count_rejections<F>(&self, n_trials: usize, trial: F) -> Result<usize>
    where
        F: Fn(usize, &mut MonteCarloRng) -> Result<bool> + Sync,
    {
        debug!(
            n_trials,
            seed = self.seed,
            parallel = self.parallel,
            "running Monte Carlo trials"
        );

        let run = |index: usize| -> Result<usize> {
            let mut rng = MonteCarloRng::for_trial(self.seed, index);
            match trial(index, &mut rng) {
                Ok(rejected) => Ok(usize::from(rejected)),
                Err(e) => {
                    warn!(trial = index, error = %e, "trial failed, aborting run");
                    Err(VartestError::trial_failed(index, e))
                }
            }
        };

        if self.parallel {
            (0..n_trials)
                .into_par_iter()
                .map(run)
                .try_reduce(|| 0, |a, b| Ok(a + b))
        } else {
            (0..n_trials).map(run).sum()
        }
    }
}
