//! Error types for the vartest CLI

use std::process::ExitCode;

use thiserror::Error;

use crate::error::VartestError;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Error from the statistics engine
    #[error("{0}")]
    Vartest(#[from] VartestError),

    /// JSON rendering failed
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Numeric exit status for this error
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Self::Vartest(
                VartestError::InvalidAlternative(_)
                | VartestError::InvalidParameter { .. }
                | VartestError::InsufficientObservations { .. },
            ) => 2,
            Self::Vartest(VartestError::DegenerateSample(_)) => 3,
            Self::Vartest(VartestError::TrialFailed { .. } | VartestError::Distribution(_)) => 4,
            Self::Json(_) => 5,
        }
    }

    /// Get exit code for this error
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}
