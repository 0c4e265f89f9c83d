//! Error types for vartest operations.
//!
//! Every fallible operation in the crate returns [`Result`]. Errors are
//! reported eagerly: an invalid alternative, an undersized sample or a bad
//! study parameter never turns into a silent `NaN` or a missing result.

use thiserror::Error;

/// Main error type for vartest operations.
///
/// # Examples
///
/// ```
/// use vartest::error::VartestError;
///
/// let err = VartestError::InvalidAlternative("bogus".to_string());
/// assert!(err.to_string().contains("invalid alternative"));
/// ```
#[derive(Debug, Error)]
pub enum VartestError {
    /// Alternative hypothesis string is not one of the supported values.
    #[error("invalid alternative: {0:?}, choose one of two-sided, greater or less")]
    InvalidAlternative(String),

    /// A sample is too short for its unbiased variance to be defined.
    #[error("insufficient observations in {sample}: got {actual}, need at least {required}")]
    InsufficientObservations {
        /// Which sample failed ("sample1" or "sample2")
        sample: &'static str,
        /// Minimum number of observations
        required: usize,
        /// Observations provided
        actual: usize,
    },

    /// Invalid test or study parameter.
    #[error("invalid parameter: {param} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Samples that produce no usable statistic (both variances zero, or
    /// non-finite observations).
    #[error("degenerate sample: {0}")]
    DegenerateSample(String),

    /// The underlying distribution could not be constructed.
    #[error("distribution error: {0}")]
    Distribution(String),

    /// A Monte Carlo trial failed; the whole estimate is aborted.
    #[error("trial {trial} failed: {source}")]
    TrialFailed {
        /// Zero-based trial index
        trial: usize,
        /// Error raised inside the trial
        #[source]
        source: Box<VartestError>,
    },
}

impl VartestError {
    /// Create an invalid parameter error with descriptive context
    #[must_use]
    pub fn invalid_parameter(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Wrap an error raised while running trial `trial`
    #[must_use]
    pub fn trial_failed(trial: usize, source: VartestError) -> Self {
        Self::TrialFailed {
            trial,
            source: Box::new(source),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, VartestError>;
