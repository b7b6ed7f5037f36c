//! Text analysis module for Tonal.
//!
//! This module provides the text normalization pipeline: char filters,
//! tokenization, token filters, lexical resources and the [`Normalizer`]
//! that wires them together in the order the sentiment model expects.

pub mod analyzer;
pub mod char_filter;
pub mod lemmatizer;
pub mod normalizer;
pub mod resources;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use lemmatizer::Lemmatizer;
pub use normalizer::Normalizer;
pub use resources::LexicalResources;
pub use token::*;
