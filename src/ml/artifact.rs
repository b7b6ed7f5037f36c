//! Loading fitted models from JSON artifacts.
//!
//! A classifier artifact is a JSON object tagged by `"kind"`:
//!
//! ```json
//! {
//!   "kind": "logistic_regression",
//!   "classes": ["negative", "positive"],
//!   "coef": [[0.4, -1.2, 2.3]],
//!   "intercept": [0.1]
//! }
//! ```
//!
//! `kind` selects the probability capability: `logistic_regression` and
//! `multinomial_nb` load as [`Classifier::Probabilistic`], `linear_svc` as
//! [`Classifier::LabelOnly`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::classifier::Classifier;
use crate::ml::linear::{LinearSvc, LogisticRegression};
use crate::ml::naive_bayes::MultinomialNb;

/// Serialized classifier, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// Logistic regression; reports probabilities.
    LogisticRegression(LogisticRegression),
    /// Linear SVM; labels only.
    LinearSvc(LinearSvc),
    /// Multinomial naive Bayes; reports probabilities.
    MultinomialNb(MultinomialNb),
}

impl ModelArtifact {
    /// Read and validate an artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let artifact: ModelArtifact = serde_json::from_reader(reader)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Check the shape of the fitted state.
    pub fn validate(&self) -> Result<()> {
        match self {
            ModelArtifact::LogisticRegression(model) => model.validate(),
            ModelArtifact::LinearSvc(model) => model.validate(),
            ModelArtifact::MultinomialNb(model) => model.validate(),
        }
    }

    /// The artifact kind as written in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::LogisticRegression(_) => "logistic_regression",
            ModelArtifact::LinearSvc(_) => "linear_svc",
            ModelArtifact::MultinomialNb(_) => "multinomial_nb",
        }
    }

    /// Wrap the model in the [`Classifier`] variant matching its capability.
    pub fn into_classifier(self) -> Classifier {
        match self {
            ModelArtifact::LogisticRegression(model) => Classifier::probabilistic(model),
            ModelArtifact::LinearSvc(model) => Classifier::label_only(model),
            ModelArtifact::MultinomialNb(model) => Classifier::probabilistic(model),
        }
    }
}

/// Load a classifier artifact and wrap it.
pub fn load_classifier(path: &Path) -> Result<Classifier> {
    let artifact = ModelArtifact::load(path)?;
    info!("Loaded {} model from {}", artifact.kind(), path.display());
    Ok(artifact.into_classifier())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logistic_regression_json() {
        let json = r#"{
            "kind": "logistic_regression",
            "classes": ["negative", "positive"],
            "coef": [[1.0, -1.0]],
            "intercept": [0.0]
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.kind(), "logistic_regression");
        artifact.validate().unwrap();

        let classifier = artifact.into_classifier();
        assert!(classifier.supports_proba());
        assert_eq!(classifier.n_features(), Some(2));
    }

    #[test]
    fn test_linear_svc_is_label_only() {
        let json = r#"{
            "kind": "linear_svc",
            "classes": ["negative", "positive"],
            "coef": [[1.0]],
            "intercept": [0.0]
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert!(!artifact.into_classifier().supports_proba());
    }

    #[test]
    fn test_multinomial_nb_json() {
        let json = r#"{
            "kind": "multinomial_nb",
            "classes": ["negative", "positive"],
            "class_log_prior": [-0.69, -0.69],
            "feature_log_prob": [[-0.2], [-1.6]]
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.kind(), "multinomial_nb");
        assert!(artifact.into_classifier().supports_proba());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"kind": "random_forest", "classes": []}"#;
        assert!(serde_json::from_str::<ModelArtifact>(json).is_err());
    }

    #[test]
    fn test_multi_class_field() {
        let json = r#"{
            "kind": "logistic_regression",
            "classes": ["a", "b", "c"],
            "coef": [[1.0], [0.0], [-1.0]],
            "intercept": [0.0, 0.0, 0.0],
            "multi_class": "ovr"
        }"#;
        match serde_json::from_str::<ModelArtifact>(json).unwrap() {
            ModelArtifact::LogisticRegression(model) => {
                assert_eq!(model.multi_class, crate::ml::linear::MultiClass::Ovr)
            }
            other => panic!("unexpected artifact {other:?}"),
        }
    }
}
