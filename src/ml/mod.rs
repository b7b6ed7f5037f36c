//! Feature extraction and classification for sentiment prediction.
//!
//! The vectorizer and classifier are fitted offline and loaded from JSON
//! artifacts. Everything here is read-only after loading:
//!
//! - [`Vectorizer`] / [`TfIdfVectorizer`]: normalized text to [`FeatureVector`]
//! - [`LabelClassifier`] / [`ProbabilisticClassifier`]: features to label and
//!   per-class probabilities
//! - [`Classifier`]: a loaded model tagged with its probability capability
//! - [`ModelArtifact`]: the serialized forms of the supported models

pub mod artifact;
pub mod classifier;
pub mod feature;
pub mod linear;
pub mod naive_bayes;
pub mod tfidf;
pub mod vectorizer;

pub use artifact::{ModelArtifact, load_classifier};
pub use classifier::{Classifier, LabelClassifier, ProbabilisticClassifier};
pub use feature::FeatureVector;
pub use linear::{LinearSvc, LogisticRegression, MultiClass};
pub use naive_bayes::MultinomialNb;
pub use tfidf::{TfIdfArtifact, TfIdfVectorizer};
pub use vectorizer::Vectorizer;
