//! Text and JSON rendering of CLI results.

use clap::ValueEnum;
use serde::Serialize;

use super::error::Result;
use crate::monte_carlo::{AggregateEstimate, PowerEstimate, SweepPoint};
use crate::stats::TestResult;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Serialize)]
struct Report<'a, T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    result: &'a T,
}

/// Render `value` as JSON or through `text`.
pub(crate) fn render<T: Serialize>(
    format: OutputFormat,
    seed: Option<u64>,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&Report {
            seed,
            result: value,
        })?),
        OutputFormat::Text => {
            let mut out = text(value);
            if let Some(seed) = seed {
                out.push_str(&format!("\nseed: {seed}"));
            }
            Ok(out)
        }
    }
}

pub(crate) fn test_result_text(result: &TestResult) -> String {
    format!(
        "{result}\ndegrees of freedom: ({}, {})",
        result.df1, result.df2
    )
}

pub(crate) fn type_i_text(estimate: &AggregateEstimate) -> String {
    format!(
        "Type I error: {} (se {})\nrejections: {}/{}",
        estimate.estimate, estimate.standard_error, estimate.rejections, estimate.simulations
    )
}

pub(crate) fn power_text(estimate: &PowerEstimate) -> String {
    format!(
        "Power: {} (se {})\nType II error: {}\nrejections: {}/{}",
        estimate.power.estimate,
        estimate.power.standard_error,
        estimate.type_ii_error,
        estimate.power.rejections,
        estimate.power.simulations
    )
}

pub(crate) fn sweep_text(points: &[SweepPoint]) -> String {
    let mut out = String::from("m\tn\tp_hat\tse_hat\tduration[s]");
    for p in points {
        out.push_str(&format!(
            "\n{}\t{}\t{}\t{}\t{:.3}",
            p.m, p.n, p.p_hat, p.se_hat, p.duration_secs
        ));
    }
    out
}
