//! Integration tests for the predictor with stub collaborators.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tonal::analysis::{LexicalResources, Normalizer};
use tonal::context::SentimentContext;
use tonal::error::{PredictError, Result, TonalError};
use tonal::ml::*;
use tonal::predictor::Predictor;

/// Records every normalized text it sees.
#[derive(Default)]
struct RecordingVectorizer {
    calls: AtomicUsize,
    seen: std::sync::Mutex<Vec<String>>,
}

impl Vectorizer for RecordingVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(text.to_string());
        Ok(FeatureVector::zeros(1))
    }

    fn name(&self) -> &str {
        "recording"
    }
}

struct BrokenVectorizer;

impl Vectorizer for BrokenVectorizer {
    fn transform(&self, _text: &str) -> Result<FeatureVector> {
        Err(TonalError::model("vocabulary not fitted"))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

struct FixedClassifier {
    classes: Vec<String>,
}

impl FixedClassifier {
    fn binary() -> Self {
        FixedClassifier {
            classes: vec!["negative".to_string(), "positive".to_string()],
        }
    }
}

impl LabelClassifier for FixedClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, _features: &FeatureVector) -> Result<String> {
        Ok("positive".to_string())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

impl ProbabilisticClassifier for FixedClassifier {
    fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>> {
        Ok(vec![0.25, 0.75])
    }
}

fn predictor_with(vectorizer: Arc<dyn Vectorizer>, classifier: Classifier) -> Result<Predictor> {
    let normalizer = Normalizer::new(&LexicalResources::english_default())?;
    let context = SentimentContext::new(normalizer, vectorizer, classifier)?;
    Ok(Predictor::new(Arc::new(context)))
}

#[test]
fn test_probabilities_as_percentages() -> Result<()> {
    let predictor = predictor_with(
        Arc::new(RecordingVectorizer::default()),
        Classifier::probabilistic(FixedClassifier::binary()),
    )?;

    let result = predictor.predict("great product")?;
    assert_eq!(result.label, "positive");

    let distribution = result.distribution.unwrap();
    assert_eq!(distribution.len(), 2);
    assert_eq!(distribution["negative"], 25.0);
    assert_eq!(distribution["positive"], 75.0);

    Ok(())
}

#[test]
fn test_label_only_has_no_distribution() -> Result<()> {
    let predictor = predictor_with(
        Arc::new(RecordingVectorizer::default()),
        Classifier::label_only(FixedClassifier::binary()),
    )?;

    let result = predictor.predict("great product")?;
    assert_eq!(result.label, "positive");
    assert!(result.distribution.is_none());

    Ok(())
}

#[test]
fn test_empty_input_rejected_before_normalization() -> Result<()> {
    let vectorizer = Arc::new(RecordingVectorizer::default());
    let predictor = predictor_with(
        vectorizer.clone(),
        Classifier::probabilistic(FixedClassifier::binary()),
    )?;

    assert_eq!(predictor.predict(""), Err(PredictError::EmptyInput));
    assert_eq!(predictor.predict("   "), Err(PredictError::EmptyInput));
    assert_eq!(predictor.predict("\n\t"), Err(PredictError::EmptyInput));
    assert_eq!(vectorizer.calls.load(Ordering::SeqCst), 0);

    Ok(())
}

#[test]
fn test_stopword_only_input_reaches_vectorizer() -> Result<()> {
    let vectorizer = Arc::new(RecordingVectorizer::default());
    let predictor = predictor_with(
        vectorizer.clone(),
        Classifier::probabilistic(FixedClassifier::binary()),
    )?;

    let result = predictor.predict("the and of")?;
    assert_eq!(result.label, "positive");
    assert_eq!(*vectorizer.seen.lock().unwrap(), vec![String::new()]);

    Ok(())
}

#[test]
fn test_vectorizer_receives_normalized_text() -> Result<()> {
    let vectorizer = Arc::new(RecordingVectorizer::default());
    let predictor = predictor_with(
        vectorizer.clone(),
        Classifier::probabilistic(FixedClassifier::binary()),
    )?;

    predictor.predict("  @shop This is AMAZING!!! https://shop.example #ad ")?;
    assert_eq!(*vectorizer.seen.lock().unwrap(), vec!["amazing".to_string()]);

    Ok(())
}

#[test]
fn test_collaborator_failure_is_wrapped() -> Result<()> {
    let predictor = predictor_with(
        Arc::new(BrokenVectorizer),
        Classifier::probabilistic(FixedClassifier::binary()),
    )?;

    match predictor.predict("great product") {
        Err(PredictError::Failure(description)) => {
            assert_eq!(description, "Model error: vocabulary not fitted");
        }
        other => panic!("expected a failure, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_batch_matches_single_predictions() -> Result<()> {
    let predictor = predictor_with(
        Arc::new(RecordingVectorizer::default()),
        Classifier::probabilistic(FixedClassifier::binary()),
    )?;

    let texts: Vec<String> = (0..64)
        .map(|i| if i % 8 == 0 { String::new() } else { format!("comment number {i}") })
        .collect();

    let batch = predictor.predict_batch(&texts);
    assert_eq!(batch.len(), texts.len());
    for (text, outcome) in texts.iter().zip(&batch) {
        assert_eq!(outcome, &predictor.predict(text));
    }

    Ok(())
}
