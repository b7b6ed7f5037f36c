//! Multinomial naive Bayes classifier.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TonalError};
use crate::ml::classifier::{LabelClassifier, ProbabilisticClassifier, argmax, softmax};
use crate::ml::feature::FeatureVector;

/// Fitted multinomial naive Bayes.
///
/// The joint log likelihood of class `c` is
/// `x · feature_log_prob[c] + class_log_prior[c]`; probabilities are its
/// softmax across classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Class labels.
    pub classes: Vec<String>,
    /// Log prior per class.
    pub class_log_prior: Vec<f64>,
    /// Log probability of each feature given each class.
    pub feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Create a model and check its shape.
    pub fn new(
        classes: Vec<String>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let model = MultinomialNb {
            classes,
            class_log_prior,
            feature_log_prob,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check the shape of the fitted state.
    pub fn validate(&self) -> Result<()> {
        let n_classes = self.classes.len();
        if n_classes < 2 {
            return Err(TonalError::model(format!(
                "A classifier needs at least 2 classes, got {n_classes}"
            )));
        }
        if self.class_log_prior.len() != n_classes {
            return Err(TonalError::model(format!(
                "class_log_prior has {} entries for {} classes",
                self.class_log_prior.len(),
                n_classes
            )));
        }
        if self.feature_log_prob.len() != n_classes {
            return Err(TonalError::model(format!(
                "feature_log_prob has {} rows for {} classes",
                self.feature_log_prob.len(),
                n_classes
            )));
        }

        let n_features = self.feature_log_prob[0].len();
        if self
            .feature_log_prob
            .iter()
            .any(|row| row.len() != n_features)
        {
            return Err(TonalError::model("feature_log_prob rows have different lengths"));
        }

        Ok(())
    }

    /// Joint log likelihood per class.
    pub fn joint_log_likelihood(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        self.feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(row, prior)| Ok(features.dot(row)? + prior))
            .collect()
    }
}

impl LabelClassifier for MultinomialNb {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &FeatureVector) -> Result<String> {
        let jll = self.joint_log_likelihood(features)?;
        let index = argmax(&jll).ok_or_else(|| TonalError::model("Empty likelihood"))?;
        Ok(self.classes[index].clone())
    }

    fn n_features(&self) -> Option<usize> {
        self.feature_log_prob.first().map(Vec::len)
    }

    fn name(&self) -> &str {
        "multinomial_nb"
    }
}

impl ProbabilisticClassifier for MultinomialNb {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        let jll = self.joint_log_likelihood(features)?;
        Ok(softmax(&jll))
    }
}
