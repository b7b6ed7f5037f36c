//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TonalArgs};
use crate::error::{PredictError, Result};
use crate::predictor::PredictionResult;

/// Plain-text rendering for `--format human`.
pub trait HumanOutput {
    /// Render as lines of text.
    fn render(&self) -> String;
}

/// Outcome for one classified comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutput {
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionOutput {
    /// Build from a prediction outcome.
    pub fn new(comment: &str, outcome: std::result::Result<PredictionResult, PredictError>) -> Self {
        match outcome {
            Ok(result) => PredictionOutput {
                comment: comment.to_string(),
                sentiment: Some(result.label),
                probabilities: result.distribution,
                error: None,
            },
            Err(e) => PredictionOutput {
                comment: comment.to_string(),
                sentiment: None,
                probabilities: None,
                error: Some(e.to_string()),
            },
        }
    }
}

impl HumanOutput for PredictionOutput {
    fn render(&self) -> String {
        let mut out = format!("{}\n", self.comment);
        if let Some(error) = &self.error {
            out.push_str(&format!("  error: {error}\n"));
            return out;
        }
        if let Some(sentiment) = &self.sentiment {
            out.push_str(&format!("  sentiment: {sentiment}\n"));
        }
        if let Some(probabilities) = &self.probabilities {
            for (label, percent) in probabilities {
                out.push_str(&format!("  {label:>12}: {percent:6.2}%\n"));
            }
        }
        out
    }
}

/// Outcomes for a file of comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutput {
    pub total: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub predictions: Vec<PredictionOutput>,
}

impl HumanOutput for BatchOutput {
    fn render(&self) -> String {
        let mut out: String = self
            .predictions
            .iter()
            .map(|p| p.render())
            .collect::<Vec<_>>()
            .join("\n");
        out.push_str(&format!(
            "\n{} comments, {} failed, {} ms\n",
            self.total, self.failed, self.duration_ms
        ));
        out
    }
}

/// Normalization result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOutput {
    pub input: String,
    pub cleaned: String,
    pub normalized: String,
}

impl HumanOutput for NormalizeOutput {
    fn render(&self) -> String {
        format!("{}\n", self.normalized)
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &TonalArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            print!("{}", result.render());
            Ok(())
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            println!("{json}");
            Ok(())
        }
    }
}
