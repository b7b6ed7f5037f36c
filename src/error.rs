//! Error types for the Tonal library.
//!
//! Two families of errors live here:
//!
//! - [`TonalError`] covers everything that can go wrong while loading lexical
//!   resources and model artifacts, parsing configuration, or running CLI
//!   commands.
//! - [`PredictError`] is the closed set of outcomes a prediction request can
//!   fail with. Callers on the request path match on it exhaustively.
//!
//! # Examples
//!
//! ```
//! use tonal::error::{Result, TonalError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TonalError::model("coef has 3 rows but 2 classes"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Tonal operations.
#[derive(Error, Debug)]
pub enum TonalError {
    /// I/O errors (artifact files, resource files, sockets)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (invalid patterns, pipeline construction)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model-related errors (artifact shape, feature dimension)
    #[error("Model error: {0}")]
    Model(String),

    /// Lexical resource errors (stopwords, lemma dictionaries)
    #[error("Resource error: {0}")]
    Resource(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A prediction request failed
    #[error(transparent)]
    Predict(#[from] PredictError),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TonalError.
pub type Result<T> = std::result::Result<T, TonalError>;

impl TonalError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TonalError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        TonalError::Model(msg.into())
    }

    /// Create a new resource error.
    pub fn resource<S: Into<String>>(msg: S) -> Self {
        TonalError::Resource(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TonalError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TonalError::Other(msg.into())
    }
}

/// Ways a single prediction request can fail.
///
/// `EmptyInput` is a client mistake; `Failure` wraps whatever the vectorizer
/// or classifier reported and is a server-side problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    /// The raw input was empty or whitespace-only.
    #[error("Please enter a valid comment")]
    EmptyInput,

    /// Feature extraction or inference failed.
    #[error("An error occurred: {0}")]
    Failure(String),
}

impl PredictError {
    /// Wrap any collaborator error, keeping only its description.
    pub fn failure<E: std::fmt::Display>(err: E) -> Self {
        PredictError::Failure(err.to_string())
    }

    /// Whether the caller, rather than the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictError::EmptyInput)
    }
}
