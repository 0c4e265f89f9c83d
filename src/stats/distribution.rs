//! Fisher-Snedecor (F) distribution.
//!
//! Thin wrapper over `statrs`' `FisherSnedecor` that makes the CDF and the
//! quantile total over their whole input domain.

use crate::error::{Result, VartestError};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// F distribution with integer degrees of freedom.
#[derive(Debug, Clone)]
pub struct FDistribution {
    df1: usize,
    df2: usize,
    inner: FisherSnedecor,
}

impl FDistribution {
    /// Create an F distribution with `df1` numerator and `df2` denominator
    /// degrees of freedom.
    ///
    /// # Errors
    ///
    /// Returns [`VartestError::InvalidParameter`] when either degree of
    /// freedom is zero.
    pub fn new(df1: usize, df2: usize) -> Result<Self> {
        if df1 == 0 {
            return Err(VartestError::invalid_parameter("df1", df1, ">= 1"));
        }
        if df2 == 0 {
            return Err(VartestError::invalid_parameter("df2", df2, ">= 1"));
        }
        let inner = FisherSnedecor::new(df1 as f64, df2 as f64)
            .map_err(|e| VartestError::Distribution(e.to_string()))?;
        Ok(Self { df1, df2, inner })
    }

    /// Numerator degrees of freedom
    #[must_use]
    pub fn df1(&self) -> usize {
        self.df1
    }

    /// Denominator degrees of freedom
    #[must_use]
    pub fn df2(&self) -> usize {
        self.df2
    }

    /// P(F <= x). Zero for negative `x`, `NaN` for `NaN`.
    #[must_use]
    pub fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= 0.0 {
            return 0.0;
        }
        if x == f64::INFINITY {
            return 1.0;
        }
        self.inner.cdf(x)
    }

    /// P(F > x), computed as `1 - cdf(x)`.
    #[must_use]
    pub fn upper_tail(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Inverse CDF.
    ///
    /// `p = 0` maps to 0 and `p = 1` to `+inf`. A `p` outside `[0, 1]`
    /// (or `NaN`) has no quantile and yields `NaN`.
    #[must_use]
    pub fn quantile(&self, p: f64) -> f64 {
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        if p == 0.0 {
            return 0.0;
        }
        if p == 1.0 {
            return f64::INFINITY;
        }
        self.inner.inverse_cdf(p)
    }
}
