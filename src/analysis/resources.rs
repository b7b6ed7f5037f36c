//! Lexical resources: the stopword set and lemmatizer used by the normalizer.
//!
//! Resources are loaded once at startup and shared read-only for the lifetime
//! of the process. Cloning [`LexicalResources`] only bumps reference counts.
//!
//! # Directory layout
//!
//! [`LexicalResources::load_dir`] looks for these files, all optional:
//!
//! - `stopwords.txt`: one stopword per line. Without it the built-in English
//!   list is used.
//! - `lemmas.txt`: known lemmas, see
//!   [`parse_lemmas`](crate::analysis::lemmatizer::dictionary::parse_lemmas).
//!   Without it words are not lemmatized.
//! - `lemma_exceptions.txt`: irregular forms, see
//!   [`parse_exceptions`](crate::analysis::lemmatizer::dictionary::parse_exceptions).

use std::fs;
use std::path::Path;
use std::sync::Arc;

use ahash::AHashSet;
use log::{info, warn};

use crate::analysis::lemmatizer::{DictionaryLemmatizer, IdentityLemmatizer, Lemmatizer};
use crate::analysis::token_filter::stop::DEFAULT_ENGLISH_STOP_WORDS_SET;
use crate::error::Result;

/// File name of the stopword list inside a resources directory.
pub const STOPWORDS_FILE: &str = "stopwords.txt";
/// File name of the lemma list inside a resources directory.
pub const LEMMAS_FILE: &str = "lemmas.txt";
/// File name of the lemma exception list inside a resources directory.
pub const LEMMA_EXCEPTIONS_FILE: &str = "lemma_exceptions.txt";

/// Immutable pair of stopword set and lemmatizer.
#[derive(Clone)]
pub struct LexicalResources {
    stopwords: Arc<AHashSet<String>>,
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl std::fmt::Debug for LexicalResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexicalResources")
            .field("stopwords", &self.stopwords.len())
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl LexicalResources {
    /// Create resources from a stopword set and a lemmatizer.
    pub fn new(stopwords: AHashSet<String>, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        LexicalResources {
            stopwords: Arc::new(stopwords),
            lemmatizer,
        }
    }

    /// Built-in English stopwords with no lemmatization.
    pub fn english_default() -> Self {
        Self::new(
            DEFAULT_ENGLISH_STOP_WORDS_SET.clone(),
            Arc::new(IdentityLemmatizer::new()),
        )
    }

    /// Built-in English stopwords with the given lemmatizer.
    pub fn english_with_lemmatizer(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Self::new(DEFAULT_ENGLISH_STOP_WORDS_SET.clone(), lemmatizer)
    }

    /// Load resources from a directory (see the module docs for the layout).
    ///
    /// Passing `None` yields [`LexicalResources::english_default`].
    pub fn load_dir(dir: Option<&Path>) -> Result<Self> {
        let Some(dir) = dir else {
            warn!("No resources directory configured; lemmatization is disabled");
            return Ok(Self::english_default());
        };

        let stopwords_path = dir.join(STOPWORDS_FILE);
        let stopwords = if stopwords_path.is_file() {
            parse_stopwords(&fs::read_to_string(&stopwords_path)?)
        } else {
            info!(
                "{} not found; using built-in English stopwords",
                stopwords_path.display()
            );
            DEFAULT_ENGLISH_STOP_WORDS_SET.clone()
        };

        let lemmas_path = dir.join(LEMMAS_FILE);
        let lemmatizer: Arc<dyn Lemmatizer> = if lemmas_path.is_file() {
            let exceptions_path = dir.join(LEMMA_EXCEPTIONS_FILE);
            let exceptions_path = exceptions_path.is_file().then_some(exceptions_path);
            Arc::new(DictionaryLemmatizer::load(
                &lemmas_path,
                exceptions_path.as_deref(),
            )?)
        } else {
            warn!(
                "{} not found; lemmatization is disabled",
                lemmas_path.display()
            );
            Arc::new(IdentityLemmatizer::new())
        };

        let resources = Self::new(stopwords, lemmatizer);
        info!(
            "Loaded lexical resources from {}: {} stopwords, {} lemmatizer",
            dir.display(),
            resources.stopwords.len(),
            resources.lemmatizer.name()
        );
        Ok(resources)
    }

    /// The shared stopword set.
    pub fn stopwords(&self) -> &Arc<AHashSet<String>> {
        &self.stopwords
    }

    /// The shared lemmatizer.
    pub fn lemmatizer(&self) -> &Arc<dyn Lemmatizer> {
        &self.lemmatizer
    }

    /// Check whether a word is a stopword.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

/// Parse a stopword list: one word per line, blank lines and `#` comments skipped.
pub fn parse_stopwords(text: &str) -> AHashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
