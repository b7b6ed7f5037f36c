//! Sentiment prediction over a loaded [`SentimentContext`].

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, error};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::context::SentimentContext;
use crate::error::PredictError;
use crate::ml::Classifier;

/// Outcome of one prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted class label.
    pub label: String,
    /// Percentage per class label, rounded to two decimals; `None` when the
    /// classifier cannot report probabilities.
    pub distribution: Option<BTreeMap<String, f64>>,
}

/// Convert a probability in `[0, 1]` to a percentage with two decimals.
pub fn to_percentage(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}

/// Runs normalization, feature extraction and classification for raw text.
#[derive(Debug, Clone)]
pub struct Predictor {
    context: Arc<SentimentContext>,
}

impl Predictor {
    /// Create a predictor over a loaded context.
    pub fn new(context: Arc<SentimentContext>) -> Self {
        Predictor { context }
    }

    /// The shared context.
    pub fn context(&self) -> &Arc<SentimentContext> {
        &self.context
    }

    /// Predict the sentiment of `text`.
    ///
    /// Input that is empty after trimming is rejected before normalization;
    /// input that normalizes to nothing is still classified.
    pub fn predict(&self, text: &str) -> Result<PredictionResult, PredictError> {
        if text.trim().is_empty() {
            return Err(PredictError::EmptyInput);
        }

        let normalized = self.context.normalizer().normalize(text);
        debug!("Normalized {:?} to {:?}", text, normalized);

        self.classify(&normalized).map_err(|e| {
            error!("Prediction failed: {e}");
            e
        })
    }

    /// Predict many inputs in parallel. Results keep the input order.
    pub fn predict_batch<S: AsRef<str> + Sync>(
        &self,
        texts: &[S],
    ) -> Vec<Result<PredictionResult, PredictError>> {
        texts
            .par_iter()
            .map(|text| self.predict(text.as_ref()))
            .collect()
    }

    fn classify(&self, normalized: &str) -> Result<PredictionResult, PredictError> {
        let features = self
            .context
            .vectorizer()
            .transform(normalized)
            .map_err(PredictError::failure)?;

        let classifier = self.context.classifier();
        let label = classifier
            .predict(&features)
            .map_err(PredictError::failure)?;

        let distribution = match classifier {
            Classifier::LabelOnly(_) => None,
            Classifier::Probabilistic(model) => {
                let probabilities = model
                    .predict_proba(&features)
                    .map_err(PredictError::failure)?;
                let classes = model.classes();
                if probabilities.len() != classes.len() {
                    return Err(PredictError::Failure(format!(
                        "Classifier returned {} probabilities for {} classes",
                        probabilities.len(),
                        classes.len()
                    )));
                }
                Some(
                    classes
                        .iter()
                        .cloned()
                        .zip(probabilities.into_iter().map(to_percentage))
                        .collect(),
                )
            }
        };

        Ok(PredictionResult {
            label,
            distribution,
        })
    }
}
