//! Word tokenizer compatible with Treebank-style word tokenization.
//!
//! The vectorizer vocabulary was built from tokens produced by a Treebank
//! word tokenizer. By the time text reaches this tokenizer in the sentiment
//! pipeline it holds only ASCII letters and whitespace, and on that input the
//! Treebank rules reduce to two steps: split on whitespace, then split a
//! small fixed set of fused contractions ("cannot" becomes "can" + "not").
//!
//! Other input is still tokenized deterministically, but punctuation is not
//! separated from words.

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Fused contractions split into two tokens, as `(word, split_at)`.
///
/// Matching is case-insensitive and only applies to whole words.
const CONTRACTIONS: &[(&str, usize)] = &[
    ("cannot", 3),
    ("gimme", 3),
    ("gonna", 3),
    ("gotta", 3),
    ("lemme", 3),
    ("wanna", 3),
];

/// A tokenizer that splits on whitespace and separates fused contractions.
#[derive(Clone, Debug, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Create a new word tokenizer.
    pub fn new() -> Self {
        WordTokenizer
    }

    /// Whitespace, counting the ASCII information separators U+001C to U+001F.
    fn is_separator(ch: char) -> bool {
        ch.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&ch)
    }

    fn contraction_split(word: &str) -> Option<usize> {
        CONTRACTIONS
            .iter()
            .find(|(form, _)| form.eq_ignore_ascii_case(word))
            .map(|&(_, split_at)| split_at)
    }

    fn push_word(tokens: &mut Vec<Token>, word: &str, start: usize) {
        let position = tokens.len();
        match Self::contraction_split(word) {
            Some(split_at) => {
                let (head, tail) = word.split_at(split_at);
                tokens.push(Token::with_offsets(head, position, start, start + split_at));
                tokens.push(Token::with_offsets(
                    tail,
                    position + 1,
                    start + split_at,
                    start + word.len(),
                ));
            }
            None => tokens.push(Token::with_offsets(word, position, start, start + word.len())),
        }
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut word_start: Option<usize> = None;

        for (idx, ch) in text.char_indices() {
            if Self::is_separator(ch) {
                if let Some(start) = word_start.take() {
                    Self::push_word(&mut tokens, &text[start..idx], start);
                }
            } else if word_start.is_none() {
                word_start = Some(idx);
            }
        }

        if let Some(start) = word_start {
            Self::push_word(&mut tokens, &text[start..], start);
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "word"
    }
}
