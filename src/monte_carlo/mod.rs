//! Monte Carlo evaluation of the F-test.
//!
//! - [`engine`]: seeded trial runner and per-trial random source
//! - [`error_rates`]: Type I error and power studies
//! - [`sweep`]: Type I error across simulation counts and sample sizes
//!
//! Reference: Morris, White & Crowther (2019), "Using simulation studies to
//! evaluate statistical methods", Statistics in Medicine 38(11).

pub mod engine;
pub mod error_rates;
pub mod sweep;

pub use engine::{AggregateEstimate, MonteCarloEngine, MonteCarloRng, PowerEstimate};
pub use error_rates::{
    estimate_power, estimate_type_i_error, PowerStudy, PowerThreshold, SimulationRun,
    TypeIErrorStudy,
};
pub use sweep::{sweep_sample_sizes, sweep_simulation_counts, SweepPoint};
