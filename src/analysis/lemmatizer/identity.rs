//! Identity lemmatizer implementation.

use super::Lemmatizer;

/// A lemmatizer that returns every word unchanged.
///
/// Used when no lemma dictionary is configured.
#[derive(Debug, Clone, Default)]
pub struct IdentityLemmatizer;

impl IdentityLemmatizer {
    /// Create a new identity lemmatizer.
    pub fn new() -> Self {
        IdentityLemmatizer
    }
}

impl Lemmatizer for IdentityLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        word.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_lemmatizer() {
        let lemmatizer = IdentityLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("movies"), "movies");
        assert_eq!(lemmatizer.lemmatize(""), "");
        assert_eq!(lemmatizer.name(), "identity");
    }
}
