//! Immutable state loaded once at startup and shared by every request.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use crate::analysis::{LexicalResources, Normalizer};
use crate::error::{Result, TonalError};
use crate::ml::{Classifier, TfIdfVectorizer, Vectorizer, load_classifier};

/// File name of the classifier artifact inside a model directory.
pub const MODEL_FILE: &str = "sentiment_model.json";

/// File name of the vectorizer artifact inside a model directory.
pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";

/// Where to find the artifacts a [`SentimentContext`] is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Classifier artifact.
    pub model_path: PathBuf,
    /// Vectorizer artifact.
    pub vectorizer_path: PathBuf,
    /// Directory with lexical resource files; built-in defaults when `None`.
    pub resources_dir: Option<PathBuf>,
}

impl ArtifactPaths {
    /// Standard file names inside `model_dir`.
    pub fn from_model_dir<P: AsRef<Path>>(model_dir: P) -> Self {
        let model_dir = model_dir.as_ref();
        ArtifactPaths {
            model_path: model_dir.join(MODEL_FILE),
            vectorizer_path: model_dir.join(VECTORIZER_FILE),
            resources_dir: None,
        }
    }

    /// Set the lexical resource directory.
    pub fn with_resources_dir<P: Into<PathBuf>>(mut self, dir: Option<P>) -> Self {
        self.resources_dir = dir.map(Into::into);
        self
    }
}

/// Normalizer, vectorizer and classifier, read-only after construction.
#[derive(Clone)]
pub struct SentimentContext {
    normalizer: Normalizer,
    vectorizer: Arc<dyn Vectorizer>,
    classifier: Classifier,
}

impl std::fmt::Debug for SentimentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentContext")
            .field("normalizer", &self.normalizer)
            .field("vectorizer", &self.vectorizer.name())
            .field("classifier", &self.classifier)
            .finish()
    }
}

impl SentimentContext {
    /// Assemble a context from already-built parts.
    ///
    /// Fails when both sides report a feature dimension and they disagree.
    pub fn new(
        normalizer: Normalizer,
        vectorizer: Arc<dyn Vectorizer>,
        classifier: Classifier,
    ) -> Result<Self> {
        if let (Some(produced), Some(expected)) = (vectorizer.dimension(), classifier.n_features())
        {
            if produced != expected {
                return Err(TonalError::model(format!(
                    "Vectorizer '{}' produces {} features but classifier '{}' expects {}",
                    vectorizer.name(),
                    produced,
                    classifier.name(),
                    expected
                )));
            }
        }

        Ok(SentimentContext {
            normalizer,
            vectorizer,
            classifier,
        })
    }

    /// Load resources and artifacts from disk.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        debug!("Loading artifacts: {paths:?}");

        let resources = LexicalResources::load_dir(paths.resources_dir.as_deref())?;
        let normalizer = Normalizer::new(&resources)?;

        let vectorizer = TfIdfVectorizer::load(&paths.vectorizer_path).map_err(|e| {
            TonalError::model(format!(
                "Failed to load vectorizer from {}: {}",
                paths.vectorizer_path.display(),
                e
            ))
        })?;
        info!(
            "Loaded vectorizer from {} ({} terms)",
            paths.vectorizer_path.display(),
            vectorizer.vocabulary_size()
        );

        let classifier = load_classifier(&paths.model_path).map_err(|e| {
            TonalError::model(format!(
                "Failed to load model from {}: {}",
                paths.model_path.display(),
                e
            ))
        })?;
        info!(
            "Classifier '{}' with classes {:?} (probabilities: {})",
            classifier.name(),
            classifier.classes(),
            classifier.supports_proba()
        );

        Self::new(normalizer, Arc::new(vectorizer), classifier)
    }

    /// Text normalizer.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Feature extractor.
    pub fn vectorizer(&self) -> &Arc<dyn Vectorizer> {
        &self.vectorizer
    }

    /// Loaded classifier.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::{FeatureVector, LinearSvc};

    struct FixedWidth(usize);

    impl Vectorizer for FixedWidth {
        fn transform(&self, _text: &str) -> Result<FeatureVector> {
            Ok(FeatureVector::zeros(self.0))
        }

        fn dimension(&self) -> Option<usize> {
            Some(self.0)
        }

        fn name(&self) -> &str {
            "fixed_width"
        }
    }

    fn svc(width: usize) -> Classifier {
        Classifier::label_only(
            LinearSvc::new(
                vec!["negative".to_string(), "positive".to_string()],
                vec![vec![0.0; width]],
                vec![0.0],
            )
            .unwrap(),
        )
    }

    fn normalizer() -> Normalizer {
        Normalizer::new(&LexicalResources::english_default()).unwrap()
    }

    #[test]
    fn test_artifact_paths() {
        let paths = ArtifactPaths::from_model_dir("models").with_resources_dir(Some("nltk"));
        assert_eq!(paths.model_path, PathBuf::from("models/sentiment_model.json"));
        assert_eq!(
            paths.vectorizer_path,
            PathBuf::from("models/tfidf_vectorizer.json")
        );
        assert_eq!(paths.resources_dir, Some(PathBuf::from("nltk")));
    }

    #[test]
    fn test_dimension_check() {
        assert!(SentimentContext::new(normalizer(), Arc::new(FixedWidth(3)), svc(3)).is_ok());

        let err = SentimentContext::new(normalizer(), Arc::new(FixedWidth(3)), svc(4)).unwrap_err();
        assert!(err.to_string().contains("produces 3 features"));
    }

    #[test]
    fn test_missing_artifacts() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = SentimentContext::load(&ArtifactPaths::from_model_dir(dir.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to load vectorizer"));
    }
}
