//! Linear classifiers: logistic regression and linear SVM.
//!
//! Both share the same fitted state: one weight row per class (a single row
//! for binary problems) and an intercept per row. Binary models predict
//! `classes[1]` when the decision value is positive; multiclass models pick
//! the row with the highest decision value.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TonalError};
use crate::ml::classifier::{LabelClassifier, ProbabilisticClassifier, argmax, sigmoid, softmax};
use crate::ml::feature::FeatureVector;

/// How logistic regression turns decision values into probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    /// One-vs-rest for binary problems, multinomial otherwise.
    #[default]
    Auto,
    /// Independent sigmoids, renormalized to sum to one.
    Ovr,
    /// Softmax over the decision values.
    Multinomial,
}

/// Check the shape of a linear model and return its number of features.
fn validate_linear(classes: &[String], coef: &[Vec<f64>], intercept: &[f64]) -> Result<usize> {
    if classes.len() < 2 {
        return Err(TonalError::model(format!(
            "A classifier needs at least 2 classes, got {}",
            classes.len()
        )));
    }

    let expected_rows = if classes.len() == 2 { 1 } else { classes.len() };
    if coef.len() != expected_rows {
        return Err(TonalError::model(format!(
            "coef has {} rows but {} classes require {}",
            coef.len(),
            classes.len(),
            expected_rows
        )));
    }
    if intercept.len() != expected_rows {
        return Err(TonalError::model(format!(
            "intercept has {} entries but coef has {} rows",
            intercept.len(),
            expected_rows
        )));
    }

    let n_features = coef[0].len();
    if coef.iter().any(|row| row.len() != n_features) {
        return Err(TonalError::model("coef rows have different lengths"));
    }

    Ok(n_features)
}

/// Decision value per coef row.
fn decision_function(
    coef: &[Vec<f64>],
    intercept: &[f64],
    features: &FeatureVector,
) -> Result<Vec<f64>> {
    coef.iter()
        .zip(intercept)
        .map(|(row, bias)| Ok(features.dot(row)? + bias))
        .collect()
}

fn predict_from_decision(classes: &[String], decision: &[f64]) -> Result<String> {
    let index = if decision.len() == 1 {
        usize::from(decision[0] > 0.0)
    } else {
        argmax(decision).ok_or_else(|| TonalError::model("Empty decision function"))?
    };

    classes
        .get(index)
        .cloned()
        .ok_or_else(|| TonalError::model(format!("No class at index {index}")))
}

/// Fitted logistic regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Class labels.
    pub classes: Vec<String>,
    /// Weight rows.
    pub coef: Vec<Vec<f64>>,
    /// Intercept per weight row.
    pub intercept: Vec<f64>,
    /// Probability mode.
    #[serde(default)]
    pub multi_class: MultiClass,
}

impl LogisticRegression {
    /// Create a model and check its shape.
    pub fn new(classes: Vec<String>, coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Result<Self> {
        let model = LogisticRegression {
            classes,
            coef,
            intercept,
            multi_class: MultiClass::Auto,
        };
        model.validate()?;
        Ok(model)
    }

    /// Set the probability mode.
    pub fn with_multi_class(mut self, multi_class: MultiClass) -> Self {
        self.multi_class = multi_class;
        self
    }

    /// Check the shape of the fitted state.
    pub fn validate(&self) -> Result<()> {
        validate_linear(&self.classes, &self.coef, &self.intercept).map(|_| ())
    }

    /// Raw decision values, one per coef row.
    pub fn decision_function(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        decision_function(&self.coef, &self.intercept, features)
    }

    fn uses_ovr(&self) -> bool {
        match self.multi_class {
            MultiClass::Ovr => true,
            MultiClass::Multinomial => false,
            MultiClass::Auto => self.classes.len() <= 2,
        }
    }
}

impl LabelClassifier for LogisticRegression {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &FeatureVector) -> Result<String> {
        let decision = self.decision_function(features)?;
        predict_from_decision(&self.classes, &decision)
    }

    fn n_features(&self) -> Option<usize> {
        self.coef.first().map(Vec::len)
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }
}

impl ProbabilisticClassifier for LogisticRegression {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        let decision = self.decision_function(features)?;

        if self.uses_ovr() {
            if decision.len() == 1 {
                let p = sigmoid(decision[0]);
                return Ok(vec![1.0 - p, p]);
            }
            let probs: Vec<f64> = decision.iter().map(|d| sigmoid(*d)).collect();
            let sum: f64 = probs.iter().sum();
            return Ok(probs.into_iter().map(|p| p / sum).collect());
        }

        if decision.len() == 1 {
            return Ok(softmax(&[-decision[0], decision[0]]));
        }
        Ok(softmax(&decision))
    }
}

/// Fitted linear support vector classifier. Reports labels only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSvc {
    /// Class labels.
    pub classes: Vec<String>,
    /// Weight rows.
    pub coef: Vec<Vec<f64>>,
    /// Intercept per weight row.
    pub intercept: Vec<f64>,
}

impl LinearSvc {
    /// Create a model and check its shape.
    pub fn new(classes: Vec<String>, coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Result<Self> {
        let model = LinearSvc {
            classes,
            coef,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check the shape of the fitted state.
    pub fn validate(&self) -> Result<()> {
        validate_linear(&self.classes, &self.coef, &self.intercept).map(|_| ())
    }

    /// Raw decision values, one per coef row.
    pub fn decision_function(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        decision_function(&self.coef, &self.intercept, features)
    }
}

impl LabelClassifier for LinearSvc {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &FeatureVector) -> Result<String> {
        let decision = self.decision_function(features)?;
        predict_from_decision(&self.classes, &decision)
    }

    fn n_features(&self) -> Option<usize> {
        self.coef.first().map(Vec::len)
    }

    fn name(&self) -> &str {
        "linear_svc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn binary_model() -> LogisticRegression {
        LogisticRegression::new(
            labels(&["negative", "positive"]),
            vec![vec![2.0, -3.0]],
            vec![0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_binary_prediction() {
        let model = binary_model();
        let positive = FeatureVector::from_dense(&[1.0, 0.0]);
        let negative = FeatureVector::from_dense(&[0.0, 1.0]);

        assert_eq!(model.predict(&positive).unwrap(), "positive");
        assert_eq!(model.predict(&negative).unwrap(), "negative");
        // A zero decision falls on the first class
        assert_eq!(model.predict(&FeatureVector::zeros(2)).unwrap(), "negative");
    }

    #[test]
    fn test_binary_ovr_probabilities() {
        let model = binary_model();
        let features = FeatureVector::from_dense(&[1.0, 0.0]);

        let probs = model.predict_proba(&features).unwrap();
        assert!((probs[1] - sigmoid(2.0)).abs() < 1e-12);
        assert!((probs[0] + probs[1] - 1.0).abs() < 1e-12);

        let zero = model.predict_proba(&FeatureVector::zeros(2)).unwrap();
        assert_eq!(zero, vec![0.5, 0.5]);
    }

    #[test]
    fn test_binary_multinomial_doubles_decision() {
        let model = binary_model().with_multi_class(MultiClass::Multinomial);
        let probs = model
            .predict_proba(&FeatureVector::from_dense(&[1.0, 0.0]))
            .unwrap();
        assert!((probs[1] - sigmoid(4.0)).abs() < 1e-12);
    }

    #[test]
    fn test_multiclass() {
        let model = LogisticRegression::new(
            labels(&["negative", "neutral", "positive"]),
            vec![vec![-1.0, 0.0], vec![0.0, 0.0], vec![1.0, 0.0]],
            vec![0.0, 0.5, 0.0],
        )
        .unwrap();

        let features = FeatureVector::from_dense(&[2.0, 0.0]);
        assert_eq!(model.predict(&features).unwrap(), "positive");

        let probs = model.predict_proba(&features).unwrap();
        assert_eq!(probs.len(), 3);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(argmax(&probs), Some(2));

        let ovr = model.clone().with_multi_class(MultiClass::Ovr);
        let probs = ovr.predict_proba(&features).unwrap();
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_shape_validation() {
        let err = LogisticRegression::new(labels(&["a", "b"]), vec![vec![1.0], vec![1.0]], vec![
            0.0, 0.0,
        ])
        .unwrap_err();
        assert!(err.to_string().contains("coef has 2 rows"));

        assert!(LinearSvc::new(labels(&["a"]), vec![vec![1.0]], vec![0.0]).is_err());
        assert!(
            LinearSvc::new(labels(&["a", "b"]), vec![vec![1.0]], vec![0.0, 1.0]).is_err()
        );
        assert!(
            LinearSvc::new(
                labels(&["a", "b", "c"]),
                vec![vec![1.0], vec![1.0, 2.0], vec![1.0]],
                vec![0.0; 3]
            )
            .is_err()
        );
    }

    #[test]
    fn test_feature_dimension_mismatch() {
        let model = binary_model();
        let err = model
            .predict(&FeatureVector::from_dense(&[1.0, 0.0, 0.0]))
            .unwrap_err();
        assert!(err.to_string().contains("expecting 2 features"));
    }

    #[test]
    fn test_linear_svc() {
        let model = LinearSvc::new(labels(&["negative", "positive"]), vec![vec![1.0]], vec![
            -0.5,
        ])
        .unwrap();
        assert_eq!(model.n_features(), Some(1));
        assert_eq!(
            model.predict(&FeatureVector::from_dense(&[1.0])).unwrap(),
            "positive"
        );
        assert_eq!(
            model.predict(&FeatureVector::from_dense(&[0.25])).unwrap(),
            "negative"
        );
    }
}
