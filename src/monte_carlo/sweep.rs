//! Type I error sweeps over simulation count and sample size.
//!
//! These are the two experiments the F-test study is usually presented
//! with: how the estimate and its cost behave as the number of trials m
//! grows, and how the empirical level behaves across sample sizes n.

use std::time::Instant;

use serde::Serialize;
use tracing::info;

use super::engine::MonteCarloEngine;
use super::error_rates::TypeIErrorStudy;
use crate::error::Result;

/// Simulation counts swept by default.
pub const DEFAULT_SIMULATION_COUNTS: [usize; 5] = [10, 100, 1_000, 10_000, 100_000];

/// Sample sizes swept by default.
pub const DEFAULT_SAMPLE_SIZES: [usize; 7] = [5, 10, 30, 50, 100, 500, 1_000];

/// Trials per point in the default sample-size sweep.
pub const SAMPLE_SIZE_SWEEP_SIMULATIONS: usize = 10_000;

/// One point of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Number of trials
    pub m: usize,
    /// Size of each sample
    pub n: usize,
    /// Empirical Type I error
    pub p_hat: f64,
    /// Standard error of `p_hat`
    pub se_hat: f64,
    /// Wall-clock time of the estimate in seconds
    pub duration_secs: f64,
}

/// Estimate the Type I error of `base` once per simulation count.
///
/// # Errors
///
/// Stops at the first point whose study is invalid or whose trials fail.
pub fn sweep_simulation_counts(
    base: &TypeIErrorStudy,
    counts: &[usize],
    engine: &MonteCarloEngine,
) -> Result<Vec<SweepPoint>> {
    counts
        .iter()
        .map(|&m| run_point(&base.clone().with_simulations(m), engine))
        .collect()
}

/// Estimate the Type I error of `base` once per sample size.
///
/// # Errors
///
/// Stops at the first point whose study is invalid or whose trials fail.
pub fn sweep_sample_sizes(
    base: &TypeIErrorStudy,
    sizes: &[usize],
    engine: &MonteCarloEngine,
) -> Result<Vec<SweepPoint>> {
    sizes
        .iter()
        .map(|&n| run_point(&base.clone().with_sample_size(n), engine))
        .collect()
}

fn run_point(study: &TypeIErrorStudy, engine: &MonteCarloEngine) -> Result<SweepPoint> {
    let start = Instant::now();
    let estimate = study.estimate(engine)?;
    let duration_secs = start.elapsed().as_secs_f64();
    info!(m = study.m, n = study.n, duration_secs, "sweep point finished");
    Ok(SweepPoint {
        m: study.m,
        n: study.n,
        p_hat: estimate.estimate,
        se_hat: estimate.standard_error,
        duration_secs,
    })
}
