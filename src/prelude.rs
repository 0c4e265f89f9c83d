//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use vartest::prelude::*;
//! ```

pub use crate::error::{Result, VartestError};
pub use crate::monte_carlo::{
    estimate_power, estimate_type_i_error, AggregateEstimate, MonteCarloEngine, PowerEstimate,
    PowerStudy, PowerThreshold, TypeIErrorStudy,
};
pub use crate::stats::{f_test, Alternative, FTest, LessCriticalValue, TestResult};
