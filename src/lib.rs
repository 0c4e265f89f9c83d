//! vartest: Monte Carlo evaluation of the two-sample variance F-test.
//!
//! Estimates, by repeated sampling from normal populations, how often the
//! F-test for equal variances rejects a true null hypothesis (Type I error)
//! and how often it rejects a false one (power).
//!
//! # Quick Start
//!
//! ```
//! use vartest::prelude::*;
//!
//! // A single test
//! let result = f_test(
//!     &[1.0, 2.0, 3.0, 4.0, 5.0],
//!     &[2.0, 4.0, 6.0, 8.0, 10.0],
//!     Alternative::TwoSided,
//!     0.05,
//!     6,
//! )
//! .expect("valid samples");
//! assert_eq!(result.statistic, 0.25);
//!
//! // Empirical level of the test
//! let engine = MonteCarloEngine::new(42);
//! let estimate = TypeIErrorStudy::default()
//!     .with_simulations(200)
//!     .estimate(&engine)
//!     .expect("valid study");
//! assert!(estimate.estimate < 0.2);
//! ```
//!
//! # Modules
//!
//! - [`stats`]: F distribution and the F-test evaluator
//! - [`monte_carlo`]: seeded trial engine, Type I error and power studies, sweeps
//! - [`cli`]: the `vartest` command line front end
//! - [`error`]: error type shared by all operations

pub mod cli;
pub mod error;
pub mod monte_carlo;
pub mod prelude;
pub mod stats;

pub use error::{Result, VartestError};
