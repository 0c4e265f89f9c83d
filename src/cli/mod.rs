//! Command line interface.
//!
//! Every subcommand maps onto one library operation; [`run`] returns the
//! rendered output so the binary only prints it.

pub mod error;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

pub use error::{CliError, Result};
pub use output::OutputFormat;

use crate::monte_carlo::error_rates::{
    DEFAULT_POWER_VARIANCE2, DEFAULT_SAMPLE_SIZE, DEFAULT_SIMULATIONS, POWER_REJECTION_LEVEL,
};
use crate::monte_carlo::sweep::{
    DEFAULT_SAMPLE_SIZES, DEFAULT_SIMULATION_COUNTS, SAMPLE_SIZE_SWEEP_SIMULATIONS,
};
use crate::monte_carlo::{
    sweep_sample_sizes, sweep_simulation_counts, MonteCarloEngine, PowerStudy, PowerThreshold,
    TypeIErrorStudy,
};
use crate::stats::hypothesis::{DEFAULT_ALPHA, DEFAULT_ROUND_TO};
use crate::stats::{Alternative, FTest, LessCriticalValue};

/// Monte Carlo evaluation of the two-sample variance F-test
#[derive(Parser, Debug)]
#[command(name = "vartest")]
#[command(about = "Estimate Type I error and power of the two-sample variance F-test")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base random seed (drawn from the OS when omitted)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Run trials on all cores (results do not change)
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Lower critical value rule for the "less" alternative
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LessRule {
    /// Quantile at the F statistic
    Statistic,
    /// Quantile at alpha
    Alpha,
}

impl From<LessRule> for LessCriticalValue {
    fn from(rule: LessRule) -> Self {
        match rule {
            LessRule::Statistic => Self::Statistic,
            LessRule::Alpha => Self::Alpha,
        }
    }
}

/// Rejection rule for power studies
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThresholdRule {
    /// p <= 0.05
    Fixed,
    /// p <= alpha
    Alpha,
}

impl From<ThresholdRule> for PowerThreshold {
    fn from(rule: ThresholdRule) -> Self {
        match rule {
            ThresholdRule::Fixed => Self::Fixed(POWER_REJECTION_LEVEL),
            ThresholdRule::Alpha => Self::Alpha,
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single F-test on two samples
    Ftest {
        /// First sample, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        sample1: Vec<f64>,

        /// Second sample, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        sample2: Vec<f64>,

        /// Alternative hypothesis: two-sided, greater or less
        #[arg(long, default_value = "two-sided")]
        alternative: String,

        /// Significance level
        #[arg(long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,

        /// Decimals to round to
        #[arg(long, default_value_t = DEFAULT_ROUND_TO)]
        round_to: u32,

        /// Lower critical value rule for the "less" alternative
        #[arg(long, value_enum, default_value_t = LessRule::Statistic)]
        less_critical: LessRule,
    },

    /// Estimate the Type I error rate
    Type1 {
        /// Size of each sample
        #[arg(short = 'n', long = "sample-size", default_value_t = DEFAULT_SAMPLE_SIZE)]
        n: usize,

        /// Number of simulated trials
        #[arg(short = 'm', long = "simulations", default_value_t = DEFAULT_SIMULATIONS)]
        m: usize,

        /// Significance level
        #[arg(long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,

        /// Mean of the first population
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        mu1: f64,

        /// Mean of the second population
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        mu2: f64,

        /// Common variance
        #[arg(long, default_value_t = 1.0)]
        var: f64,

        /// Decimals to round to
        #[arg(long, default_value_t = DEFAULT_ROUND_TO)]
        round_to: u32,
    },

    /// Estimate power and Type II error
    Power {
        /// Size of each sample
        #[arg(short = 'n', long = "sample-size", default_value_t = DEFAULT_SAMPLE_SIZE)]
        n: usize,

        /// Number of simulated trials
        #[arg(short = 'm', long = "simulations", default_value_t = DEFAULT_SIMULATIONS)]
        m: usize,

        /// Significance level of the F-test
        #[arg(long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,

        /// Mean of the first population
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        mu1: f64,

        /// Mean of the second population
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        mu2: f64,

        /// Variance of the first population
        #[arg(long, default_value_t = 1.0)]
        var1: f64,

        /// Variance of the second population
        #[arg(long, default_value_t = DEFAULT_POWER_VARIANCE2)]
        var2: f64,

        /// Decimals to round to
        #[arg(long, default_value_t = DEFAULT_ROUND_TO)]
        round_to: u32,

        /// Rejection rule
        #[arg(long, value_enum, default_value_t = ThresholdRule::Fixed)]
        threshold: ThresholdRule,
    },

    /// Type I error across simulation counts
    SweepM {
        /// Simulation counts, comma separated
        #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SIMULATION_COUNTS.to_vec())]
        counts: Vec<usize>,

        /// Size of each sample
        #[arg(short = 'n', long = "sample-size", default_value_t = DEFAULT_SAMPLE_SIZE)]
        n: usize,

        /// Significance level
        #[arg(long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,
    },

    /// Type I error across sample sizes
    SweepN {
        /// Sample sizes, comma separated
        #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SAMPLE_SIZES.to_vec())]
        sizes: Vec<usize>,

        /// Number of simulated trials per size
        #[arg(short = 'm', long = "simulations", default_value_t = SAMPLE_SIZE_SWEEP_SIMULATIONS)]
        m: usize,

        /// Significance level
        #[arg(long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,
    },
}

/// Execute the parsed command and return its rendered output.
///
/// # Errors
///
/// Any library error, or a JSON rendering failure.
pub fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Commands::Ftest {
            sample1,
            sample2,
            alternative,
            alpha,
            round_to,
            less_critical,
        } => {
            let alternative: Alternative = alternative.parse()?;
            let result = FTest::new()
                .with_alternative(alternative)
                .with_alpha(*alpha)
                .with_round_to(*round_to)
                .with_less_critical((*less_critical).into())
                .evaluate(sample1, sample2)?;
            output::render(cli.format, None, &result, output::test_result_text)
        }
        Commands::Type1 {
            n,
            m,
            alpha,
            mu1,
            mu2,
            var,
            round_to,
        } => {
            let engine = engine(cli);
            let estimate = TypeIErrorStudy::default()
                .with_sample_size(*n)
                .with_simulations(*m)
                .with_alpha(*alpha)
                .with_means(*mu1, *mu2)
                .with_variance(*var)
                .with_round_to(*round_to)
                .estimate(&engine)?;
            output::render(cli.format, Some(engine.seed()), &estimate, output::type_i_text)
        }
        Commands::Power {
            n,
            m,
            alpha,
            mu1,
            mu2,
            var1,
            var2,
            round_to,
            threshold,
        } => {
            let engine = engine(cli);
            let estimate = PowerStudy::default()
                .with_sample_size(*n)
                .with_simulations(*m)
                .with_alpha(*alpha)
                .with_means(*mu1, *mu2)
                .with_variances(*var1, *var2)
                .with_round_to(*round_to)
                .with_threshold((*threshold).into())
                .estimate(&engine)?;
            output::render(cli.format, Some(engine.seed()), &estimate, output::power_text)
        }
        Commands::SweepM { counts, n, alpha } => {
            let engine = engine(cli);
            let base = TypeIErrorStudy::default()
                .with_sample_size(*n)
                .with_alpha(*alpha);
            let points = sweep_simulation_counts(&base, counts, &engine)?;
            output::render(cli.format, Some(engine.seed()), &points, |p| output::sweep_text(p))
        }
        Commands::SweepN { sizes, m, alpha } => {
            let engine = engine(cli);
            let base = TypeIErrorStudy::default()
                .with_simulations(*m)
                .with_alpha(*alpha);
            let points = sweep_sample_sizes(&base, sizes, &engine)?;
            output::render(cli.format, Some(engine.seed()), &points, |p| output::sweep_text(p))
        }
    }
}

fn engine(cli: &Cli) -> MonteCarloEngine {
    let engine = match cli.seed {
        Some(seed) => MonteCarloEngine::new(seed),
        None => {
            let engine = MonteCarloEngine::from_entropy();
            info!(seed = engine.seed(), "no --seed given, drew one from the OS");
            engine
        }
    };
    engine.with_parallel(cli.parallel)
}
