//! # Tonal
//!
//! Sentiment classification for short user-written texts, served over HTTP.
//!
//! ## Features
//!
//! - Deterministic text normalization built on a char-filter / tokenizer /
//!   token-filter pipeline
//! - TF-IDF feature extraction compatible with fitted vocabularies
//! - Logistic regression, linear SVM and multinomial naive Bayes models
//!   loaded from JSON artifacts
//! - actix-web endpoint and a small browser UI
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tonal::context::{ArtifactPaths, SentimentContext};
//! use tonal::predictor::Predictor;
//!
//! # fn example() -> tonal::error::Result<()> {
//! let context = SentimentContext::load(&ArtifactPaths::from_model_dir("models"))?;
//! let predictor = Predictor::new(Arc::new(context));
//!
//! let result = predictor.predict("I love this product!")?;
//! println!("{} {:?}", result.label, result.distribution);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod ml;
pub mod predictor;
pub mod server;

pub mod prelude {
    pub use crate::analysis::{LexicalResources, Normalizer};
    pub use crate::context::{ArtifactPaths, SentimentContext};
    pub use crate::error::{PredictError, Result, TonalError};
    pub use crate::ml::{Classifier, FeatureVector, Vectorizer};
    pub use crate::predictor::{PredictionResult, Predictor};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
