//! Core analyzer trait definition.
//!
//! An [`Analyzer`] turns raw text into a stream of tokens:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → ... → Filter N → Token Stream
//! ```
//!
//! # Examples
//!
//! Implementing a custom analyzer:
//!
//! ```
//! use tonal::analysis::analyzer::Analyzer;
//! use tonal::analysis::token::{Token, TokenStream};
//! use tonal::error::Result;
//!
//! struct CommaAnalyzer;
//!
//! impl Analyzer for CommaAnalyzer {
//!     fn analyze(&self, text: &str) -> Result<TokenStream> {
//!         let tokens: Vec<Token> = text
//!             .split(',')
//!             .enumerate()
//!             .map(|(i, s)| Token::new(s.trim(), i))
//!             .collect();
//!         Ok(Box::new(tokens.into_iter()))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "comma"
//!     }
//! }
//!
//! let tokens: Vec<_> = CommaAnalyzer.analyze("a, b").unwrap().collect();
//! assert_eq!(tokens[1].text, "b");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and logging).
    fn name(&self) -> &str;
}
