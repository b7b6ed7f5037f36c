//! TF-IDF vectorizer for text feature extraction.
//!
//! The vectorizer is fitted offline; this module only loads the fitted state
//! and reproduces `transform`:
//!
//! 1. extract tokens with the token pattern (after lowercasing, if enabled)
//! 2. expand them into word n-grams joined by single spaces
//! 3. count vocabulary hits (or mark presence when `binary`)
//! 4. apply `1 + ln(tf)` when `sublinear_tf`
//! 5. multiply by the per-term idf, when present
//! 6. normalize the row (`l2` by default)
//!
//! Terms outside the vocabulary are ignored, so the empty document maps to
//! the all-zero vector.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::LowercaseCharFilter;
use crate::analysis::tokenizer::RegexTokenizer;
use crate::analysis::tokenizer::regex::DEFAULT_TOKEN_PATTERN;
use crate::error::{Result, TonalError};
use crate::ml::feature::FeatureVector;
use crate::ml::vectorizer::Vectorizer;

/// Row normalization applied after idf weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    /// Divide by the sum of absolute values.
    L1,
    /// Divide by the Euclidean norm.
    L2,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_lowercase() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

/// Serialized state of a fitted TF-IDF vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfArtifact {
    /// Term to column index.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column; absent when idf weighting is off.
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    /// Smallest and largest n-gram size.
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    /// Replace tf with `1 + ln(tf)`.
    #[serde(default)]
    pub sublinear_tf: bool,
    /// Use presence (1.0) instead of counts.
    #[serde(default)]
    pub binary: bool,
    /// Row normalization; `null` disables it.
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    /// Lowercase documents before token extraction.
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    /// Regular expression selecting tokens.
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
}

impl TfIdfArtifact {
    /// An artifact with default settings over the given vocabulary and idf.
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Self {
        TfIdfArtifact {
            vocabulary,
            idf: Some(idf),
            ngram_range: default_ngram_range(),
            sublinear_tf: false,
            binary: false,
            norm: default_norm(),
            lowercase: default_lowercase(),
            token_pattern: default_token_pattern(),
        }
    }

    fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(TonalError::model(format!(
                "Invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let size = self.vocabulary.len();
        let mut seen = vec![false; size];
        for (term, &index) in &self.vocabulary {
            if index >= size {
                return Err(TonalError::model(format!(
                    "Vocabulary index {index} of '{term}' out of range for {size} terms"
                )));
            }
            if seen[index] {
                return Err(TonalError::model(format!(
                    "Vocabulary index {index} is assigned to more than one term"
                )));
            }
            seen[index] = true;
        }

        if let Some(idf) = &self.idf {
            if idf.len() != size {
                return Err(TonalError::model(format!(
                    "idf has {} entries but the vocabulary has {} terms",
                    idf.len(),
                    size
                )));
            }
        }

        Ok(())
    }
}

/// TF-IDF vectorizer for text feature extraction.
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> index mapping.
    vocabulary: AHashMap<String, usize>,
    /// Inverse document frequency for each term.
    idf: Option<Vec<f64>>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    binary: bool,
    norm: Option<Norm>,
    /// Analyzer for token extraction.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("ngram_range", &self.ngram_range)
            .field("sublinear_tf", &self.sublinear_tf)
            .field("norm", &self.norm)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Build a vectorizer from its serialized state.
    pub fn from_artifact(artifact: TfIdfArtifact) -> Result<Self> {
        artifact.validate()?;

        let mut analyzer =
            PipelineAnalyzer::new(Arc::new(RegexTokenizer::with_pattern(&artifact.token_pattern)?))
                .with_name("tfidf_tokens");
        if artifact.lowercase {
            analyzer = analyzer.add_char_filter(Arc::new(LowercaseCharFilter::new()));
        }

        Ok(TfIdfVectorizer {
            vocabulary: artifact.vocabulary.into_iter().collect(),
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            binary: artifact.binary,
            norm: artifact.norm,
            analyzer: Arc::new(analyzer),
        })
    }

    /// Load a vectorizer from a JSON artifact file.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let artifact: TfIdfArtifact = serde_json::from_reader(reader)?;
        Self::from_artifact(artifact)
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column index of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Terms (n-grams included) extracted from a document, before vocabulary lookup.
    pub fn terms(&self, document: &str) -> Result<Vec<String>> {
        let tokens: Vec<String> = self.analyzer.analyze(document)?.map(|t| t.text).collect();
        Ok(word_ngrams(&tokens, self.ngram_range))
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector> {
        let entries: Vec<(usize, f64)> = self
            .terms(text)?
            .iter()
            .filter_map(|term| self.vocabulary.get(term.as_str()))
            .map(|&index| (index, 1.0))
            .collect();

        let mut features = FeatureVector::new(self.vocabulary.len(), entries)?;

        if self.binary {
            features = features.map_values(|_, _| 1.0);
        }
        if self.sublinear_tf {
            features = features.map_values(|_, tf| tf.ln() + 1.0);
        }
        if let Some(idf) = &self.idf {
            features = features.map_values(|index, tf| tf * idf[index]);
        }

        Ok(match self.norm {
            Some(Norm::L2) => {
                let norm = features.l2_norm();
                features.scale_down(norm)
            }
            Some(Norm::L1) => {
                let norm = features.l1_norm();
                features.scale_down(norm)
            }
            None => features,
        })
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.vocabulary.len())
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}

/// Expand tokens into word n-grams for `(min_n, max_n)`.
///
/// Unigrams come first in token order, then bigrams, and so on.
pub fn word_ngrams(tokens: &[String], (min_n, max_n): (usize, usize)) -> Vec<String> {
    if max_n == 1 {
        return tokens.to_vec();
    }

    let mut terms = Vec::new();
    let mut min_n = min_n;
    if min_n == 1 {
        terms.extend(tokens.iter().cloned());
        min_n += 1;
    }

    let n_tokens = tokens.len();
    for n in min_n..=max_n.min(n_tokens) {
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }

    terms
}
