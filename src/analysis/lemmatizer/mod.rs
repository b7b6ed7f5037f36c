//! Lemmatizers that reduce words to their dictionary base form.
//!
//! A lemmatizer is one half of the lexical resources the normalizer depends
//! on (the other half is the stopword set). Lemmatizers are loaded once and
//! shared read-only between all requests, hence the `Send + Sync` bound.

/// Trait for lemmatization algorithms.
pub trait Lemmatizer: Send + Sync {
    /// Reduce a word to its lemma. Unknown words are returned unchanged.
    fn lemmatize(&self, word: &str) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

pub mod dictionary;
pub mod identity;

pub use dictionary::DictionaryLemmatizer;
pub use identity::IdentityLemmatizer;
