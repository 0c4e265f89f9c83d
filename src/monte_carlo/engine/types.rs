//! Aggregate results of a Monte Carlo run.

use serde::Serialize;

use crate::stats::round_to;

/// Binomial standard error of a proportion: `sqrt(p(1-p)/m)`.
///
/// `m = 0` has no standard error and yields `NaN`.
#[must_use]
pub fn binomial_standard_error(p: f64, m: usize) -> f64 {
    (p * (1.0 - p) / m as f64).sqrt()
}

/// Proportion of rejecting trials with its binomial standard error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateEstimate {
    /// Point estimate in `[0, 1]`, rounded
    pub estimate: f64,
    /// Standard error of the estimate, rounded
    pub standard_error: f64,
    /// Number of trials that rejected H₀
    pub rejections: usize,
    /// Number of trials run
    pub simulations: usize,
}

impl AggregateEstimate {
    /// Build from raw counts. The standard error uses the unrounded
    /// proportion; both are then rounded to `digits` decimals.
    #[must_use]
    pub fn from_counts(rejections: usize, simulations: usize, digits: u32) -> Self {
        let p = raw_proportion(rejections, simulations);
        Self {
            estimate: round_to(p, digits),
            standard_error: round_to(binomial_standard_error(p, simulations), digits),
            rejections,
            simulations,
        }
    }

    /// `(estimate, standard_error)`
    #[must_use]
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.estimate, self.standard_error)
    }
}

/// Empirical power with its standard error and the Type II error rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerEstimate {
    /// Rejection rate under the alternative
    pub power: AggregateEstimate,
    /// `1 - power`, rounded
    pub type_ii_error: f64,
}

impl PowerEstimate {
    /// Build from raw counts, rounding all three values to `digits` decimals
    #[must_use]
    pub fn from_counts(rejections: usize, simulations: usize, digits: u32) -> Self {
        let p = raw_proportion(rejections, simulations);
        Self {
            power: AggregateEstimate::from_counts(rejections, simulations, digits),
            type_ii_error: round_to(1.0 - p, digits),
        }
    }

    /// `(power, standard_error, type_ii_error)`
    #[must_use]
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (
            self.power.estimate,
            self.power.standard_error,
            self.type_ii_error,
        )
    }
}

fn raw_proportion(count: usize, total: usize) -> f64 {
    count as f64 / total as f64
}
