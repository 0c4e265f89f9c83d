//! Two-sample F-test for equality of variances.
//!
//! H₀: σ₁² = σ₂²
//! H₁: σ₁² ≠ σ₂² (two-sided), σ₁² > σ₂² (greater) or σ₁² < σ₂² (less)
//!
//! The statistic is the ratio of the unbiased sample variances,
//! F = s₁² / s₂², compared against F(n₁ - 1, n₂ - 1).
//!
//! # Example
//!
//! ```
//! use vartest::stats::hypothesis::{f_test, Alternative};
//!
//! let group1 = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let group2 = vec![2.0, 4.0, 6.0, 8.0, 10.0];
//!
//! let result = f_test(&group1, &group2, Alternative::TwoSided, 0.05, 6).expect("valid F-test inputs");
//! assert_eq!(result.statistic, 0.25);
//! assert_eq!(result.pvalue, 0.208);
//! println!("{result}");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use super::distribution::FDistribution;
use super::{round_to, sample_variance};
use crate::error::{Result, VartestError};

/// Default significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default number of decimals results are rounded to.
pub const DEFAULT_ROUND_TO: u32 = 6;

/// Name reported for the F statistic.
pub const F_STATISTIC_NAME: &str = "F";

/// Alternative hypothesis of the F-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    /// σ₁² ≠ σ₂²
    #[default]
    TwoSided,
    /// σ₁² > σ₂²
    Greater,
    /// σ₁² < σ₂²
    Less,
}

impl Alternative {
    /// The canonical string form ("two-sided", "greater", "less").
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwoSided => "two-sided",
            Self::Greater => "greater",
            Self::Less => "less",
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alternative {
    type Err = VartestError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "two-sided" => Ok(Self::TwoSided),
            "greater" => Ok(Self::Greater),
            "less" => Ok(Self::Less),
            other => Err(VartestError::InvalidAlternative(other.to_string())),
        }
    }
}

/// Probability the "less" alternative feeds to the F quantile for its
/// lower critical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LessCriticalValue {
    /// Quantile at the F statistic itself. Matches the results of earlier
    /// analyses; a statistic above 1 has no quantile and gives `NaN`.
    #[default]
    Statistic,
    /// Quantile at `alpha`, the textbook lower critical value.
    Alpha,
}

/// Outcome of an F-test: statistic, p-value and critical values.
///
/// Which critical values are present depends on the alternative:
/// two-sided carries both, "greater" only the upper one and "less" only the
/// lower one.
///
/// In JSON, non-finite numbers are written as the strings `"+Infinity"`,
/// `"-Infinity"` and `"NaN"`; an absent critical value is `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    /// F statistic, rounded
    #[serde(serialize_with = "serialize_number")]
    pub statistic: f64,
    /// Statistic name ("F")
    pub stat_name: &'static str,
    /// Lower bound of the distribution's support (0)
    pub dist_min: f64,
    /// Upper bound of the distribution's support (+inf)
    #[serde(serialize_with = "serialize_number")]
    pub dist_max: f64,
    /// p-value under the chosen alternative, rounded
    pub pvalue: f64,
    /// Numerator degrees of freedom (n₁ - 1)
    pub df1: usize,
    /// Denominator degrees of freedom (n₂ - 1)
    pub df2: usize,
    /// Alternative hypothesis the test was run under
    pub alternative: Alternative,
    /// Lower critical value, if the alternative defines one
    #[serde(serialize_with = "serialize_optional_number")]
    pub conf_low: Option<f64>,
    /// Upper critical value, if the alternative defines one
    #[serde(serialize_with = "serialize_optional_number")]
    pub conf_up: Option<f64>,
}

impl TestResult {
    /// Build a result for an F statistic on `[0, +inf)`.
    #[must_use]
    pub fn new(
        statistic: f64,
        pvalue: f64,
        df1: usize,
        df2: usize,
        alternative: Alternative,
        conf_low: Option<f64>,
        conf_up: Option<f64>,
    ) -> Self {
        Self {
            statistic,
            stat_name: F_STATISTIC_NAME,
            dist_min: 0.0,
            dist_max: f64::INFINITY,
            pvalue,
            df1,
            df2,
            alternative,
            conf_low,
            conf_up,
        }
    }

    /// Confidence interval bounds, `None` when no critical value is known.
    #[must_use]
    pub fn confidence_interval(&self) -> Option<(f64, f64)> {
        match (self.conf_low, self.conf_up) {
            (Some(low), Some(up)) => Some((low, up)),
            (Some(low), None) => Some((low, self.dist_max)),
            (None, Some(up)) => Some((self.dist_min, up)),
            (None, None) => None,
        }
    }

    /// Whether `statistic` falls in the rejection region. `None` when no
    /// critical value is known.
    #[must_use]
    pub fn in_rejection_region(&self) -> Option<bool> {
        let stat = self.statistic;
        match (self.conf_low, self.conf_up) {
            (Some(low), Some(up)) => Some(stat < low || stat > up),
            (Some(low), None) => Some(stat < low),
            (None, Some(up)) => Some(stat > up),
            (None, None) => None,
        }
    }

    /// "p-value: ..." line
    #[must_use]
    pub fn p_value_text(&self) -> String {
        format!("p-value: {}", self.pvalue)
    }

    /// "F statistic: ..." line
    #[must_use]
    pub fn statistic_text(&self) -> String {
        format!("{} statistic: {}", self.stat_name, self.statistic)
    }

    /// Confidence interval description.
    #[must_use]
    pub fn confidence_interval_text(&self) -> String {
        match self.confidence_interval() {
            Some((low, up)) => format!(
                "Confidence interval: ({}; {})",
                format_bound(low),
                format_bound(up)
            ),
            None => "Confidence interval: unavailable (no critical values)".to_string(),
        }
    }

    /// Rejection region description.
    #[must_use]
    pub fn rejection_region_text(&self) -> String {
        let min = format_bound(self.dist_min);
        let max = format_bound(self.dist_max);
        match (self.conf_low, self.conf_up) {
            (Some(low), Some(up)) => format!(
                "Rejection region: ({min}; {}) AND ({}; {max})",
                format_bound(low),
                format_bound(up)
            ),
            (Some(low), None) => format!("Rejection region: ({min}; {})", format_bound(low)),
            (None, Some(up)) => format!("Rejection region: ({}; {max})", format_bound(up)),
            (None, None) => "Rejection region: unavailable (no critical values)".to_string(),
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.p_value_text())?;
        writeln!(f, "{}", self.statistic_text())?;
        writeln!(f, "{}", self.confidence_interval_text())?;
        write!(f, "{}", self.rejection_region_text())
    }
}

fn format_bound(x: f64) -> String {
    match non_finite_name(x) {
        Some(name) => name.to_string(),
        None => x.to_string(),
    }
}

fn non_finite_name(x: f64) -> Option<&'static str> {
    if x.is_nan() {
        Some("NaN")
    } else if x == f64::INFINITY {
        Some("+Infinity")
    } else if x == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

// serde_json writes non-finite floats as null, which would hide a NaN bound
fn serialize_number<S: Serializer>(
    x: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match non_finite_name(*x) {
        Some(name) => serializer.serialize_str(name),
        None => serializer.serialize_f64(*x),
    }
}

fn serialize_optional_number<S: Serializer>(
    x: &Option<f64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match x {
        Some(x) => serialize_number(x, serializer),
        None => serializer.serialize_none(),
    }
}

/// Configured F-test.
///
/// # Example
///
/// ```
/// use vartest::stats::hypothesis::{Alternative, FTest};
///
/// let test = FTest::new().with_alternative(Alternative::Greater).with_alpha(0.01);
/// let result = test.evaluate(&[1.0, 4.0, 9.0, 16.0], &[1.0, 2.0, 3.0, 4.0]).expect("valid input");
/// assert!(result.conf_up.is_some());
/// assert!(result.conf_low.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FTest {
    /// Alternative hypothesis
    pub alternative: Alternative,
    /// Significance level in (0, 1)
    pub alpha: f64,
    /// Decimals to round statistic, p-value and critical values to
    pub round_to: u32,
    /// Lower critical value rule for the "less" alternative
    pub less_critical: LessCriticalValue,
}

impl Default for FTest {
    fn default() -> Self {
        Self {
            alternative: Alternative::TwoSided,
            alpha: DEFAULT_ALPHA,
            round_to: DEFAULT_ROUND_TO,
            less_critical: LessCriticalValue::Statistic,
        }
    }
}

impl FTest {
    /// Two-sided test at alpha = 0.05, rounded to 6 decimals
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alternative hypothesis
    #[must_use]
    pub fn with_alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = alternative;
        self
    }

    /// Set the significance level
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the rounding precision
    #[must_use]
    pub fn with_round_to(mut self, round_to: u32) -> Self {
        self.round_to = round_to;
        self
    }

    /// Set the lower critical value rule for the "less" alternative
    #[must_use]
    pub fn with_less_critical(mut self, rule: LessCriticalValue) -> Self {
        self.less_critical = rule;
        self
    }

    /// Run the test on two samples.
    ///
    /// # Errors
    ///
    /// - [`VartestError::InvalidParameter`] if alpha is not in (0, 1)
    /// - [`VartestError::InsufficientObservations`] if a sample has fewer
    ///   than 2 observations
    /// - [`VartestError::DegenerateSample`] if a sample holds non-finite
    ///   values or both variances are zero
    pub fn evaluate(&self, sample1: &[f64], sample2: &[f64]) -> Result<TestResult> {
        let (statistic, dist) = self.statistic(sample1, sample2)?;
        let digits = self.round_to;
        let alpha = self.alpha;

        let (conf_low, conf_up) = match self.alternative {
            Alternative::TwoSided => (
                Some(dist.quantile(alpha / 2.0)),
                Some(dist.quantile(1.0 - alpha / 2.0)),
            ),
            Alternative::Greater => (None, Some(dist.quantile(1.0 - alpha))),
            Alternative::Less => {
                let prob = match self.less_critical {
                    LessCriticalValue::Statistic => statistic,
                    LessCriticalValue::Alpha => alpha,
                };
                (Some(dist.quantile(prob)), None)
            }
        };

        Ok(TestResult::new(
            statistic,
            round_to(self.raw_pvalue(statistic, &dist), digits),
            dist.df1(),
            dist.df2(),
            self.alternative,
            conf_low.map(|c| round_to(c, digits)),
            conf_up.map(|c| round_to(c, digits)),
        ))
    }

    /// Rounded p-value alone, without the critical values.
    ///
    /// Equal to `evaluate(..)?.pvalue`; simulation loops that only compare
    /// p-values use this to skip the quantile evaluations.
    ///
    /// # Errors
    ///
    /// Same as [`FTest::evaluate`].
    pub fn pvalue(&self, sample1: &[f64], sample2: &[f64]) -> Result<f64> {
        let (statistic, dist) = self.statistic(sample1, sample2)?;
        Ok(round_to(self.raw_pvalue(statistic, &dist), self.round_to))
    }

    /// Rounded F statistic and its null distribution.
    fn statistic(&self, sample1: &[f64], sample2: &[f64]) -> Result<(f64, FDistribution)> {
        validate_alpha(self.alpha)?;
        let var1 = unbiased_variance(sample1, "sample1")?;
        let var2 = unbiased_variance(sample2, "sample2")?;

        let ratio = var1 / var2;
        if ratio.is_nan() {
            return Err(VartestError::DegenerateSample(
                "both samples have zero variance".into(),
            ));
        }

        let dist = FDistribution::new(sample1.len() - 1, sample2.len() - 1)?;
        Ok((round_to(ratio, self.round_to), dist))
    }

    fn raw_pvalue(&self, statistic: f64, dist: &FDistribution) -> f64 {
        match self.alternative {
            Alternative::TwoSided => {
                let upper = dist.upper_tail(statistic);
                2.0 * upper.min(1.0 - upper)
            }
            Alternative::Greater => dist.upper_tail(statistic),
            Alternative::Less => dist.cdf(statistic),
        }
    }
}

/// F-test for equality of two variances.
///
/// # Arguments
///
/// * `sample1`, `sample2` - Samples with at least 2 observations each
/// * `alternative` - Alternative hypothesis
/// * `alpha` - Significance level in (0, 1)
/// * `round_to` - Decimals to round the reported numbers to
///
/// # Errors
///
/// See [`FTest::evaluate`].
pub fn f_test(
    sample1: &[f64],
    sample2: &[f64],
    alternative: Alternative,
    alpha: f64,
    round_to: u32,
) -> Result<TestResult> {
    FTest::new()
        .with_alternative(alternative)
        .with_alpha(alpha)
        .with_round_to(round_to)
        .evaluate(sample1, sample2)
}

pub(crate) fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(VartestError::invalid_parameter(
            "alpha",
            alpha,
            "0 < alpha < 1",
        ))
    }
}

fn unbiased_variance(sample: &[f64], name: &'static str) -> Result<f64> {
    if sample.iter().any(|x| !x.is_finite()) {
        return Err(VartestError::DegenerateSample(format!(
            "{name} contains non-finite observations"
        )));
    }
    sample_variance(sample).ok_or(VartestError::InsufficientObservations {
        sample: name,
        required: 2,
        actual: sample.len(),
    })
}
