//! Text normalization feeding the sentiment vectorizer.
//!
//! The normalizer must reproduce, token for token, the text the vectorizer
//! was fitted on. Its stages run in a fixed order and reordering any of them
//! changes the output:
//!
//! 1. lowercase the whole text
//! 2. delete URL-like runs (`http\S+|www\S+|https\S+`)
//! 3. delete mentions and hashtags (`@\w+|#\w+`)
//! 4. delete every character that is not an ASCII letter or whitespace
//! 5. split into words ([`WordTokenizer`])
//! 6. drop stopwords and tokens of fewer than three characters, lemmatize the rest
//! 7. join the surviving lemmas with single spaces
//!
//! Whitespace throughout means the regex `\s` class plus the ASCII
//! information separators U+001C to U+001F, and a word character is a
//! letter, a number or `_` (combining marks are not word characters). These
//! are the definitions the vectorizer's training text was cleaned with.
//!
//! Stage 4 inserts nothing in place of what it removes, so words separated
//! only by digits or punctuation are fused: `great!5stars` becomes the single
//! token `greatstars`. The vectorizer vocabulary was built with this quirk, so
//! it is kept.
//!
//! # Examples
//!
//! ```
//! use tonal::analysis::normalizer::Normalizer;
//! use tonal::analysis::resources::LexicalResources;
//!
//! let normalizer = Normalizer::new(&LexicalResources::english_default()).unwrap();
//! assert_eq!(
//!     normalizer.normalize("LOVED it!!! see https://t.co/x @bob #win"),
//!     "loved see"
//! );
//! ```

use std::sync::Arc;

use log::error;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::{LowercaseCharFilter, PatternReplaceCharFilter};
use crate::analysis::resources::LexicalResources;
use crate::analysis::token_filter::{LemmaFilter, LengthFilter, StopFilter};
use crate::analysis::tokenizer::WordTokenizer;
use crate::error::Result;

/// URL-like runs: anything glued to `http`, `https` or `www`.
pub const URL_PATTERN: &str =
    r"http[^\s\x1C-\x1F]+|www[^\s\x1C-\x1F]+|https[^\s\x1C-\x1F]+";

/// `@mention` and `#hashtag` tokens, marker included.
pub const MENTION_HASHTAG_PATTERN: &str = r"@[\p{L}\p{N}_]+|#[\p{L}\p{N}_]+";

/// Everything except ASCII letters and whitespace.
pub const NON_LETTER_PATTERN: &str = r"[^a-zA-Z\s\x1C-\x1F]";

/// Tokens shorter than this are dropped before lemmatization.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Deterministic text-to-text normalizer.
///
/// Output depends only on the input text and the [`LexicalResources`] the
/// normalizer was built with. Safe to share between threads.
#[derive(Clone)]
pub struct Normalizer {
    analyzer: Arc<PipelineAnalyzer>,
    resources: LexicalResources,
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("analyzer", &self.analyzer)
            .field("resources", &self.resources)
            .finish()
    }
}

impl Normalizer {
    /// Build the normalization pipeline over the given resources.
    pub fn new(resources: &LexicalResources) -> Result<Self> {
        let analyzer = PipelineAnalyzer::new(Arc::new(WordTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::remove(URL_PATTERN)?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::remove(
                MENTION_HASHTAG_PATTERN,
            )?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::remove(
                NON_LETTER_PATTERN,
            )?))
            .add_filter(Arc::new(StopFilter::with_stop_words(Arc::clone(
                resources.stopwords(),
            ))))
            .add_filter(Arc::new(LengthFilter::new(MIN_TOKEN_CHARS)))
            .add_filter(Arc::new(LemmaFilter::new(Arc::clone(
                resources.lemmatizer(),
            ))))
            .with_name("sentiment_normalizer");

        Ok(Normalizer {
            analyzer: Arc::new(analyzer),
            resources: resources.clone(),
        })
    }

    /// Normalize `text` into space-joined lemmas.
    ///
    /// Never fails; the result is empty when no token survives.
    pub fn normalize(&self, text: &str) -> String {
        match self.analyzer.analyze(text) {
            Ok(tokens) => tokens
                .map(|token| token.text)
                .collect::<Vec<_>>()
                .join(" "),
            Err(e) => {
                // None of the pipeline stages built in `new` can fail.
                error!("Normalization pipeline failed: {e}");
                String::new()
            }
        }
    }

    /// The text after the char-filter stages (1 to 4), before tokenization.
    pub fn clean(&self, text: &str) -> String {
        self.analyzer.apply_char_filters(text)
    }

    /// The resources this normalizer was built with.
    pub fn resources(&self) -> &LexicalResources {
        &self.resources
    }
}
