//! Dictionary-backed noun lemmatizer.
//!
//! This follows the WordNet "morphy" procedure for nouns, which is what the
//! sentiment model's training pipeline applied to every token:
//!
//! 1. If the word has an entry in the exception list, the candidates are the
//!    word itself followed by its listed base forms.
//! 2. Otherwise every suffix rule that matches is applied once, and the
//!    candidates are the word followed by the rewritten forms.
//! 3. Candidates that are known lemmas are kept, in order, without
//!    duplicates. If none is known (and the word had no exception entry),
//!    the rules are applied again to the rewritten forms until a known lemma
//!    appears or no rule matches any more.
//! 4. The shortest surviving candidate wins; on a tie the earliest one does.
//!    With no survivor the word is returned unchanged.
//!
//! A consequence worth knowing: "was" becomes "wa" when "wa" is in the lemma
//! list, because the lemmatizer treats every token as a noun.

use std::fs;
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use log::debug;

use super::Lemmatizer;
use crate::error::{Result, TonalError};

/// Noun suffix substitutions, as `(suffix, replacement)`.
const NOUN_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// A lemmatizer backed by a lemma list and an exception map.
#[derive(Debug, Clone, Default)]
pub struct DictionaryLemmatizer {
    lemmas: AHashSet<String>,
    exceptions: AHashMap<String, Vec<String>>,
}

impl DictionaryLemmatizer {
    /// Create a lemmatizer from a lemma set and an exception map.
    pub fn new(lemmas: AHashSet<String>, exceptions: AHashMap<String, Vec<String>>) -> Self {
        DictionaryLemmatizer { lemmas, exceptions }
    }

    /// Create a lemmatizer from a list of known lemmas and no exceptions.
    pub fn from_lemmas<I, S>(lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lemmas.into_iter().map(Into::into).collect(), AHashMap::new())
    }

    /// Add an irregular form and its base forms.
    pub fn with_exception<S: Into<String>>(mut self, inflected: S, bases: &[&str]) -> Self {
        self.exceptions.insert(
            inflected.into(),
            bases.iter().map(|base| base.to_string()).collect(),
        );
        self
    }

    /// Load a lemma list file and an optional exception file.
    ///
    /// See [`parse_lemmas`] and [`parse_exceptions`] for the formats.
    pub fn load(lemmas_path: &Path, exceptions_path: Option<&Path>) -> Result<Self> {
        let lemmas = parse_lemmas(&fs::read_to_string(lemmas_path)?);

        let exceptions = match exceptions_path {
            Some(path) => parse_exceptions(&fs::read_to_string(path)?)?,
            None => AHashMap::new(),
        };

        debug!(
            "Loaded lemma dictionary: {} lemmas, {} exceptions",
            lemmas.len(),
            exceptions.len()
        );

        Ok(Self::new(lemmas, exceptions))
    }

    /// Number of known lemmas.
    pub fn lemma_count(&self) -> usize {
        self.lemmas.len()
    }

    /// Number of exception entries.
    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    /// Check whether a word is a known lemma.
    pub fn is_lemma(&self, word: &str) -> bool {
        self.lemmas.contains(word)
    }

    fn apply_rules(forms: &[String]) -> Vec<String> {
        let mut rewritten = Vec::new();
        for form in forms {
            for (suffix, replacement) in NOUN_SUBSTITUTIONS {
                if let Some(stem) = form.strip_suffix(suffix) {
                    rewritten.push(format!("{stem}{replacement}"));
                }
            }
        }
        rewritten
    }

    fn known<'a, I>(&self, forms: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut known: Vec<&str> = Vec::new();
        for form in forms {
            if self.lemmas.contains(form.as_str()) && !known.contains(&form.as_str()) {
                known.push(form);
            }
        }
        known
    }

    fn candidates(&self, word: &str) -> Vec<String> {
        let original = vec![word.to_string()];

        if let Some(bases) = self.exceptions.get(word) {
            let forms: Vec<String> = original.iter().chain(bases.iter()).cloned().collect();
            return self.known(&forms).into_iter().map(str::to_string).collect();
        }

        let mut forms = Self::apply_rules(&original);
        let found = self.known(original.iter().chain(forms.iter()));
        if !found.is_empty() {
            return found.into_iter().map(str::to_string).collect();
        }

        while !forms.is_empty() {
            forms = Self::apply_rules(&forms);
            let found = self.known(&forms);
            if !found.is_empty() {
                return found.into_iter().map(str::to_string).collect();
            }
        }

        Vec::new()
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        self.candidates(word)
            .into_iter()
            .min_by_key(|candidate| candidate.chars().count())
            .unwrap_or_else(|| word.to_string())
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}

/// Parse a lemma list.
///
/// One lemma per line; only the first whitespace-separated field of a line is
/// used, so WordNet `index.noun` files can be read directly. Blank lines and
/// lines starting with `#` or a space (the WordNet license header) are
/// skipped.
pub fn parse_lemmas(text: &str) -> AHashSet<String> {
    text.lines()
        .filter(|line| !line.starts_with(' ') && !line.trim_start().starts_with('#'))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Parse an exception list in WordNet `.exc` format.
///
/// Each line is `inflected base [base ...]`. Blank lines and `#` comments are
/// skipped; a line with an inflected form but no base is an error.
pub fn parse_exceptions(text: &str) -> Result<AHashMap<String, Vec<String>>> {
    let mut exceptions = AHashMap::new();

    for (line_num, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let inflected = match fields.next() {
            Some(field) => field.to_string(),
            None => continue,
        };
        let bases: Vec<String> = fields.map(str::to_string).collect();
        if bases.is_empty() {
            return Err(TonalError::resource(format!(
                "Exception entry '{}' on line {} has no base form",
                inflected,
                line_num + 1
            )));
        }

        exceptions.insert(inflected, bases);
    }

    Ok(exceptions)
}
