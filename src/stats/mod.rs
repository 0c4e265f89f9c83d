//! Statistics for the two-sample variance F-test.
//!
//! - [`distribution`]: the Fisher-Snedecor (F) distribution
//! - [`hypothesis`]: the F-test evaluator and its [`TestResult`]
//!
//! The helpers in this module are the small descriptive pieces the test is
//! built from: mean, unbiased variance and decimal rounding.
//!
//! # Examples
//!
//! ```
//! use vartest::stats::{round_to, sample_variance};
//!
//! let var = sample_variance(&[1.0, 2.0, 3.0, 4.0, 5.0]).expect("two or more observations");
//! assert_eq!(var, 2.5);
//! assert_eq!(round_to(0.104_117_537, 6), 0.104_118);
//! ```

pub mod distribution;
pub mod hypothesis;

pub use distribution::FDistribution;
pub use hypothesis::{f_test, Alternative, FTest, LessCriticalValue, TestResult};

/// Arithmetic mean, `None` for an empty slice.
#[must_use]
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Unbiased sample variance (divisor n-1), `None` for fewer than 2 values.
#[must_use]
pub fn sample_variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let mean = mean(data)?;
    let ss = data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>();
    Some(ss / (data.len() - 1) as f64)
}

/// Round `value` to `digits` decimal places, ties to even.
///
/// Never fails: `NaN` and infinities pass through, and precisions beyond
/// what an `f64` can represent leave the value unchanged.
#[must_use]
pub fn round_to(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(digits.min(308) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= 2f64.powi(52) {
        return value;
    }
    scaled.round_ties_even() / factor
}

#[cfg(test)]
mod tests_hypothesis_contract;
