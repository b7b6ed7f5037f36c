//! Tokenizer implementations for text analysis.
//!
//! Tokenizers split the char-filtered text into tokens. They are the second
//! stage of the analysis pipeline, after char filters and before token
//! filters.
//!
//! # Available Tokenizers
//!
//! - [`word::WordTokenizer`] - Whitespace splitting with Treebank-style
//!   contraction splitting
//! - [`regex::RegexTokenizer`] - Every match of a regular expression
//!
//! # Examples
//!
//! ```
//! use tonal::analysis::tokenizer::Tokenizer;
//! use tonal::analysis::tokenizer::word::WordTokenizer;
//!
//! let tokenizer = WordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("i cannot wait").unwrap().collect();
//! assert_eq!(tokens.len(), 4);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a single tokenizer can be shared by
/// every request handler.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod word;

pub use self::regex::RegexTokenizer;
pub use word::WordTokenizer;
