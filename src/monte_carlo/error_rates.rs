//! Empirical Type I error and power of the two-sided F-test.
//!
//! Each trial draws two normal samples, runs the two-sided F-test and
//! checks the p-value against a rejection threshold. The fraction of
//! rejecting trials estimates the Type I error rate when the population
//! variances are equal and the power when they differ.
//!
//! # Example
//!
//! ```
//! use vartest::monte_carlo::{MonteCarloEngine, PowerStudy};
//!
//! let engine = MonteCarloEngine::new(42);
//! let estimate = PowerStudy::default()
//!     .with_simulations(200)
//!     .with_variances(1.0, 4.0)
//!     .estimate(&engine)
//!     .expect("valid study");
//! assert!(estimate.power.estimate > 0.5);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::engine::{AggregateEstimate, MonteCarloEngine, MonteCarloRng, PowerEstimate};
use crate::error::{Result, VartestError};
use crate::stats::hypothesis::{validate_alpha, FTest, DEFAULT_ALPHA, DEFAULT_ROUND_TO};

/// Default size of each of the two samples.
pub const DEFAULT_SAMPLE_SIZE: usize = 30;

/// Default number of simulated trials.
pub const DEFAULT_SIMULATIONS: usize = 1000;

/// Default variance of the second population in a power study.
pub const DEFAULT_POWER_VARIANCE2: f64 = 1.5;

/// Level power studies count rejections against unless told otherwise.
pub const POWER_REJECTION_LEVEL: f64 = 0.05;

/// Rule deciding whether a power-study trial rejected H₀.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerThreshold {
    /// Reject when `p <= level`, whatever alpha the test was run with
    Fixed(f64),
    /// Reject when `p <= alpha`
    Alpha,
}

impl Default for PowerThreshold {
    fn default() -> Self {
        Self::Fixed(POWER_REJECTION_LEVEL)
    }
}

impl PowerThreshold {
    fn level(self, alpha: f64) -> f64 {
        match self {
            Self::Fixed(level) => level,
            Self::Alpha => alpha,
        }
    }
}

/// Two normal populations and the sample size drawn from each.
#[derive(Debug, Clone, Copy)]
struct TrialDesign {
    n: usize,
    mu1: f64,
    sd1: f64,
    mu2: f64,
    sd2: f64,
}

/// One trial: two fresh samples and the p-value of their two-sided F-test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationRun {
    /// Zero-based trial index
    pub trial: usize,
    /// Two-sided p-value
    pub pvalue: f64,
}

impl SimulationRun {
    fn draw(
        trial: usize,
        rng: &mut MonteCarloRng,
        design: &TrialDesign,
        test: &FTest,
    ) -> Result<Self> {
        let x1 = rng.normal_sample(design.n, design.mu1, design.sd1)?;
        let x2 = rng.normal_sample(design.n, design.mu2, design.sd2)?;
        Ok(Self {
            trial,
            pvalue: test.pvalue(&x1, &x2)?,
        })
    }
}

/// Type I error study: both populations share one variance, so every
/// rejection is a false positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeIErrorStudy {
    /// Size of each sample
    pub n: usize,
    /// Number of trials
    pub m: usize,
    /// Significance level; a trial rejects when `p < alpha`
    pub alpha: f64,
    /// Mean of the first population
    pub mu1: f64,
    /// Mean of the second population
    pub mu2: f64,
    /// Common variance
    pub var: f64,
    /// Decimals the estimate is rounded to
    pub round_to: u32,
}

impl Default for TypeIErrorStudy {
    fn default() -> Self {
        Self {
            n: DEFAULT_SAMPLE_SIZE,
            m: DEFAULT_SIMULATIONS,
            alpha: DEFAULT_ALPHA,
            mu1: 0.0,
            mu2: 0.0,
            var: 1.0,
            round_to: DEFAULT_ROUND_TO,
        }
    }
}

impl TypeIErrorStudy {
    /// Set the size of each sample
    #[must_use]
    pub fn with_sample_size(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Set the number of trials
    #[must_use]
    pub fn with_simulations(mut self, m: usize) -> Self {
        self.m = m;
        self
    }

    /// Set the significance level
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set both population means
    #[must_use]
    pub fn with_means(mut self, mu1: f64, mu2: f64) -> Self {
        self.mu1 = mu1;
        self.mu2 = mu2;
        self
    }

    /// Set the common variance
    #[must_use]
    pub fn with_variance(mut self, var: f64) -> Self {
        self.var = var;
        self
    }

    /// Set the rounding precision of the estimate
    #[must_use]
    pub fn with_round_to(mut self, round_to: u32) -> Self {
        self.round_to = round_to;
        self
    }

    /// Check every parameter before any trial runs.
    ///
    /// # Errors
    ///
    /// [`VartestError::InvalidParameter`] naming the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        validate_common(self.n, self.m, self.alpha, self.mu1, self.mu2)?;
        validate_variance("var", self.var)
    }

    /// Run the study.
    ///
    /// # Errors
    ///
    /// Invalid parameters, or the first failing trial.
    pub fn estimate(&self, engine: &MonteCarloEngine) -> Result<AggregateEstimate> {
        self.validate()?;
        debug!(n = self.n, m = self.m, alpha = self.alpha, "estimating type I error");

        let sd = self.var.sqrt();
        let design = TrialDesign {
            n: self.n,
            mu1: self.mu1,
            sd1: sd,
            mu2: self.mu2,
            sd2: sd,
        };
        let test = FTest::new().with_alpha(self.alpha);
        let alpha = self.alpha;

        let rejections = engine.count_rejections(self.m, |trial, rng| {
            SimulationRun::draw(trial, rng, &design, &test).map(|run| run.pvalue < alpha)
        })?;

        let estimate = AggregateEstimate::from_counts(rejections, self.m, self.round_to);
        info!(
            rejections,
            simulations = self.m,
            p_hat = estimate.estimate,
            se_hat = estimate.standard_error,
            "type I error estimated"
        );
        Ok(estimate)
    }
}

/// Power study: the populations have different variances, so every
/// rejection is a true positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerStudy {
    /// Size of each sample
    pub n: usize,
    /// Number of trials
    pub m: usize,
    /// Significance level the F-test is run with
    pub alpha: f64,
    /// Mean of the first population
    pub mu1: f64,
    /// Mean of the second population
    pub mu2: f64,
    /// Variance of the first population
    pub var1: f64,
    /// Variance of the second population
    pub var2: f64,
    /// Decimals the estimates are rounded to
    pub round_to: u32,
    /// Rejection rule; defaults to `p <= 0.05`
    pub threshold: PowerThreshold,
}

impl Default for PowerStudy {
    fn default() -> Self {
        Self {
            n: DEFAULT_SAMPLE_SIZE,
            m: DEFAULT_SIMULATIONS,
            alpha: DEFAULT_ALPHA,
            mu1: 0.0,
            mu2: 0.0,
            var1: 1.0,
            var2: DEFAULT_POWER_VARIANCE2,
            round_to: DEFAULT_ROUND_TO,
            threshold: PowerThreshold::default(),
        }
    }
}

impl PowerStudy {
    /// Set the size of each sample
    #[must_use]
    pub fn with_sample_size(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Set the number of trials
    #[must_use]
    pub fn with_simulations(mut self, m: usize) -> Self {
        self.m = m;
        self
    }

    /// Set the significance level
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set both population means
    #[must_use]
    pub fn with_means(mut self, mu1: f64, mu2: f64) -> Self {
        self.mu1 = mu1;
        self.mu2 = mu2;
        self
    }

    /// Set both population variances
    #[must_use]
    pub fn with_variances(mut self, var1: f64, var2: f64) -> Self {
        self.var1 = var1;
        self.var2 = var2;
        self
    }

    /// Set the rounding precision of the estimates
    #[must_use]
    pub fn with_round_to(mut self, round_to: u32) -> Self {
        self.round_to = round_to;
        self
    }

    /// Set the rejection rule
    #[must_use]
    pub fn with_threshold(mut self, threshold: PowerThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check every parameter before any trial runs.
    ///
    /// # Errors
    ///
    /// [`VartestError::InvalidParameter`] naming the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        validate_common(self.n, self.m, self.alpha, self.mu1, self.mu2)?;
        validate_variance("var1", self.var1)?;
        validate_variance("var2", self.var2)?;
        if let PowerThreshold::Fixed(level) = self.threshold {
            if !(0.0..=1.0).contains(&level) {
                return Err(VartestError::invalid_parameter(
                    "threshold",
                    level,
                    "0 <= threshold <= 1",
                ));
            }
        }
        Ok(())
    }

    /// Run the study.
    ///
    /// # Errors
    ///
    /// Invalid parameters, or the first failing trial.
    pub fn estimate(&self, engine: &MonteCarloEngine) -> Result<PowerEstimate> {
        self.validate()?;
        let level = self.threshold.level(self.alpha);
        debug!(
            n = self.n,
            m = self.m,
            alpha = self.alpha,
            level,
            var1 = self.var1,
            var2 = self.var2,
            "estimating power"
        );

        let design = TrialDesign {
            n: self.n,
            mu1: self.mu1,
            sd1: self.var1.sqrt(),
            mu2: self.mu2,
            sd2: self.var2.sqrt(),
        };
        let test = FTest::new().with_alpha(self.alpha);

        let rejections = engine.count_rejections(self.m, |trial, rng| {
            SimulationRun::draw(trial, rng, &design, &test).map(|run| run.pvalue <= level)
        })?;

        let estimate = PowerEstimate::from_counts(rejections, self.m, self.round_to);
        info!(
            rejections,
            simulations = self.m,
            power = estimate.power.estimate,
            se_power = estimate.power.standard_error,
            type_ii_error = estimate.type_ii_error,
            "power estimated"
        );
        Ok(estimate)
    }
}

/// Empirical Type I error of the two-sided F-test.
///
/// Returns `(p_hat, se_hat)`. See [`TypeIErrorStudy`] for the parameters;
/// `seed` fixes the random stream.
///
/// # Errors
///
/// Invalid parameters, or the first failing trial.
#[allow(clippy::too_many_arguments)]
pub fn estimate_type_i_error(
    n: usize,
    m: usize,
    alpha: f64,
    mu1: f64,
    mu2: f64,
    var: f64,
    round_to: u32,
    seed: u64,
) -> Result<(f64, f64)> {
    let study = TypeIErrorStudy {
        n,
        m,
        alpha,
        mu1,
        mu2,
        var,
        round_to,
    };
    Ok(study.estimate(&MonteCarloEngine::new(seed))?.as_tuple())
}

/// Empirical power of the two-sided F-test.
///
/// Returns `(power, se_power, type_ii_error)`, counting rejections at the
/// fixed level 0.05. See [`PowerStudy`] for the parameters; `seed` fixes
/// the random stream.
///
/// # Errors
///
/// Invalid parameters, or the first failing trial.
#[allow(clippy::too_many_arguments)]
pub fn estimate_power(
    n: usize,
    m: usize,
    alpha: f64,
    mu1: f64,
    mu2: f64,
    var1: f64,
    var2: f64,
    round_to: u32,
    seed: u64,
) -> Result<(f64, f64, f64)> {
    let study = PowerStudy {
        n,
        m,
        alpha,
        mu1,
        mu2,
        var1,
        var2,
        round_to,
        threshold: PowerThreshold::default(),
    };
    Ok(study.estimate(&MonteCarloEngine::new(seed))?.as_tuple())
}

fn validate_common(n: usize, m: usize, alpha: f64, mu1: f64, mu2: f64) -> Result<()> {
    if n < 2 {
        return Err(VartestError::invalid_parameter("n", n, ">= 2"));
    }
    if m == 0 {
        return Err(VartestError::invalid_parameter("m", m, ">= 1"));
    }
    validate_alpha(alpha)?;
    for (name, mu) in [("mu1", mu1), ("mu2", mu2)] {
        if !mu.is_finite() {
            return Err(VartestError::invalid_parameter(name, mu, "a finite value"));
        }
    }
    Ok(())
}

fn validate_variance(name: &str, var: f64) -> Result<()> {
    if var.is_finite() && var > 0.0 {
        Ok(())
    } else {
        Err(VartestError::invalid_parameter(name, var, "a finite value > 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_i_defaults() {
        let study = TypeIErrorStudy::default();
        assert_eq!(study.n, 30);
        assert_eq!(study.m, 1000);
        assert_eq!(study.alpha, 0.05);
        assert_eq!((study.mu1, study.mu2), (0.0, 0.0));
        assert_eq!(study.var, 1.0);
        assert_eq!(study.round_to, 6);
    }

    #[test]
    fn test_trial_pvalue_matches_full_test() {
        let design = TrialDesign {
            n: 10,
            mu1: 0.0,
            sd1: 1.0,
            mu2: 0.0,
            sd2: 1.2,
        };
        let test = FTest::new();
        let run = SimulationRun::draw(4, &mut MonteCarloRng::for_trial(9, 4), &design, &test)
            .expect("valid design");

        let mut rng = MonteCarloRng::for_trial(9, 4);
        let x1 = rng.normal_sample(10, 0.0, 1.0).expect("valid parameters");
        let x2 = rng.normal_sample(10, 0.0, 1.2).expect("valid parameters");
        let full = test.evaluate(&x1, &x2).expect("valid samples");
        assert_eq!(run.trial, 4);
        assert_eq!(run.pvalue, full.pvalue);
    }

    #[test]
    fn test_power_defaults() {
        let study = PowerStudy::default();
        assert_eq!(study.n, 30);
        assert_eq!(study.m, 1000);
        assert_eq!(study.alpha, 0.05);
        assert_eq!((study.var1, study.var2), (1.0, 1.5));
        assert_eq!(study.round_to, 6);
        assert_eq!(study.threshold, PowerThreshold::Fixed(0.05));
    }

    #[test]
    fn test_type_i_reproducible() {
        let study = TypeIErrorStudy::default().with_simulations(300);
        let a = study.estimate(&MonteCarloEngine::new(11)).expect("valid study");
        let b = study.estimate(&MonteCarloEngine::new(11)).expect("valid study");
        assert_eq!(a, b);
    }

    #[test]
    fn test_type_i_parallel_matches_sequential() {
        let study = TypeIErrorStudy::default().with_simulations(400).with_sample_size(12);
        let seq = study.estimate(&MonteCarloEngine::new(3)).expect("valid study");
        let par = study
            .estimate(&MonteCarloEngine::new(3).with_parallel(true))
            .expect("valid study");
        assert_eq!(seq, par);
    }

    #[test]
    fn test_type_i_se_is_binomial() {
        let est = TypeIErrorStudy::default()
            .with_simulations(500)
            .with_round_to(12)
            .estimate(&MonteCarloEngine::new(5))
            .expect("valid study");
        let p = est.rejections as f64 / 500.0;
        let expected = (p * (1.0 - p) / 500.0).sqrt();
        assert!((est.standard_error - expected).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&est.estimate));
    }

    #[test]
    fn test_means_do_not_matter_for_variance_test() {
        // Shifting a sample leaves its variance unchanged up to rounding,
        // so the same random stream rejects in the same trials.
        let base = TypeIErrorStudy::default().with_simulations(200);
        let shifted = base.clone().with_means(5.0, -3.0);
        let engine = MonteCarloEngine::new(8);
        let a = base.estimate(&engine).expect("valid study");
        let b = shifted.estimate(&engine).expect("valid study");
        assert!((a.estimate - b.estimate).abs() <= 0.01);
    }

    #[test]
    fn test_power_detects_large_difference() {
        let est = PowerStudy::default()
            .with_simulations(300)
            .with_variances(1.0, 4.0)
            .estimate(&MonteCarloEngine::new(21))
            .expect("valid study");
        assert!(est.power.estimate > 0.9, "power {}", est.power.estimate);
        assert!((est.power.estimate + est.type_ii_error - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_power_threshold_alpha_is_stricter_at_small_alpha() {
        let base = PowerStudy::default()
            .with_simulations(300)
            .with_alpha(0.01)
            .with_variances(1.0, 2.0);
        let engine = MonteCarloEngine::new(17);
        let fixed = base.estimate(&engine).expect("valid study");
        let alpha = base
            .clone()
            .with_threshold(PowerThreshold::Alpha)
            .estimate(&engine)
            .expect("valid study");
        // Same p-values, tighter cut.
        assert!(alpha.power.rejections <= fixed.power.rejections);
    }

    #[test]
    fn test_free_functions_match_studies() {
        let tuple = estimate_type_i_error(10, 100, 0.05, 0.0, 0.0, 1.0, 6, 77).expect("valid");
        let study = TypeIErrorStudy::default()
            .with_sample_size(10)
            .with_simulations(100)
            .estimate(&MonteCarloEngine::new(77))
            .expect("valid");
        assert_eq!(tuple, study.as_tuple());

        let tuple = estimate_power(10, 100, 0.05, 0.0, 0.0, 1.0, 3.0, 6, 77).expect("valid");
        let study = PowerStudy::default()
            .with_sample_size(10)
            .with_simulations(100)
            .with_variances(1.0, 3.0)
            .estimate(&MonteCarloEngine::new(77))
            .expect("valid");
        assert_eq!(tuple, study.as_tuple());
    }

    #[test]
    fn test_invalid_parameters_rejected_before_running() {
        let engine = MonteCarloEngine::new(1);
        let bad = [
            TypeIErrorStudy::default().with_sample_size(1),
            TypeIErrorStudy::default().with_simulations(0),
            TypeIErrorStudy::default().with_alpha(0.0),
            TypeIErrorStudy::default().with_variance(0.0),
            TypeIErrorStudy::default().with_variance(-1.0),
            TypeIErrorStudy::default().with_means(f64::NAN, 0.0),
        ];
        for study in bad {
            let err = study.estimate(&engine).unwrap_err();
            assert!(matches!(err, VartestError::InvalidParameter { .. }), "{err}");
        }

        let err = PowerStudy::default()
            .with_variances(1.0, f64::INFINITY)
            .estimate(&engine)
            .unwrap_err();
        assert!(matches!(err, VartestError::InvalidParameter { ref param, .. } if param == "var2"));

        let err = PowerStudy::default()
            .with_threshold(PowerThreshold::Fixed(1.5))
            .estimate(&engine)
            .unwrap_err();
        assert!(matches!(err, VartestError::InvalidParameter { ref param, .. } if param == "threshold"));
    }

    #[test]
    fn test_simulation_run_records_pvalue() {
        let design = TrialDesign {
            n: 8,
            mu1: 0.0,
            sd1: 1.0,
            mu2: 0.0,
            sd2: 1.0,
        };
        let mut rng = MonteCarloRng::new(4);
        let run = SimulationRun::draw(2, &mut rng, &design, &FTest::new()).expect("valid trial");
        assert_eq!(run.trial, 2);
        assert!((0.0..=1.0).contains(&run.pvalue));
    }

    #[test]
    fn test_study_serde_roundtrip() {
        let study = PowerStudy::default().with_threshold(PowerThreshold::Alpha);
        let json = serde_json::to_string(&study).expect("serializable");
        let back: PowerStudy = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(study, back);
    }
}
