//! Classifier traits and the capability-tagged [`Classifier`] handle.
//!
//! Whether a model can report class probabilities is decided once, when the
//! artifact is loaded, by wrapping it in the matching [`Classifier`] variant.
//! Request handling then matches on the variant instead of probing the model.

use std::sync::Arc;

use crate::error::Result;
use crate::ml::feature::FeatureVector;

/// A classifier that predicts a single label.
pub trait LabelClassifier: Send + Sync {
    /// Class labels, in the order probability outputs are aligned to.
    fn classes(&self) -> &[String];

    /// Predict the label for a feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<String>;

    /// Number of input features, when known.
    fn n_features(&self) -> Option<usize> {
        None
    }

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

/// A classifier that can also report a probability per class.
pub trait ProbabilisticClassifier: LabelClassifier {
    /// Probabilities aligned to [`LabelClassifier::classes`].
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>>;
}

/// A loaded classifier, tagged with its probability capability.
#[derive(Clone)]
pub enum Classifier {
    /// Predicts labels only.
    LabelOnly(Arc<dyn LabelClassifier>),
    /// Predicts labels and per-class probabilities.
    Probabilistic(Arc<dyn ProbabilisticClassifier>),
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variant = match self {
            Classifier::LabelOnly(_) => "LabelOnly",
            Classifier::Probabilistic(_) => "Probabilistic",
        };
        f.debug_struct(variant)
            .field("name", &self.name())
            .field("classes", &self.classes())
            .finish()
    }
}

impl Classifier {
    /// Wrap a label-only classifier.
    pub fn label_only<C: LabelClassifier + 'static>(classifier: C) -> Self {
        Classifier::LabelOnly(Arc::new(classifier))
    }

    /// Wrap a probabilistic classifier.
    pub fn probabilistic<C: ProbabilisticClassifier + 'static>(classifier: C) -> Self {
        Classifier::Probabilistic(Arc::new(classifier))
    }

    /// Class labels.
    pub fn classes(&self) -> &[String] {
        match self {
            Classifier::LabelOnly(c) => c.classes(),
            Classifier::Probabilistic(c) => c.classes(),
        }
    }

    /// Predict the label for a feature vector.
    pub fn predict(&self, features: &FeatureVector) -> Result<String> {
        match self {
            Classifier::LabelOnly(c) => c.predict(features),
            Classifier::Probabilistic(c) => c.predict(features),
        }
    }

    /// Number of input features, when known.
    pub fn n_features(&self) -> Option<usize> {
        match self {
            Classifier::LabelOnly(c) => c.n_features(),
            Classifier::Probabilistic(c) => c.n_features(),
        }
    }

    /// Whether per-class probabilities are available.
    pub fn supports_proba(&self) -> bool {
        matches!(self, Classifier::Probabilistic(_))
    }

    /// Name of the wrapped classifier.
    pub fn name(&self) -> &str {
        match self {
            Classifier::LabelOnly(c) => c.name(),
            Classifier::Probabilistic(c) => c.name(),
        }
    }
}

/// Index of the first maximum, as `numpy.argmax` picks it.
pub(crate) fn argmax(scores: &[f64]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (index, &score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((index, score)),
        })
        .map(|(index, _)| index)
}

/// Numerically stable logistic function.
pub(crate) fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Numerically stable softmax.
pub(crate) fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
