//! Length filter implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that removes tokens shorter than a minimum number of characters.
///
/// The sentiment pipeline uses a minimum of 3, so one and two letter tokens
/// never reach the lemmatizer.
#[derive(Clone, Debug)]
pub struct LengthFilter {
    min_chars: usize,
}

impl LengthFilter {
    /// Create a filter that keeps tokens of at least `min_chars` characters.
    pub fn new(min_chars: usize) -> Self {
        LengthFilter { min_chars }
    }

    /// The minimum token length kept by this filter.
    pub fn min_chars(&self) -> usize {
        self.min_chars
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let min_chars = self.min_chars;
        let filtered: Vec<Token> = tokens
            .filter(|token| token.char_len() >= min_chars)
            .collect();

        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_filter() {
        let filter = LengthFilter::new(3);
        let tokens = vec![
            Token::new("ok", 0),
            Token::new("bad", 1),
            Token::new("a", 2),
            Token::new("terrible", 3),
        ];

        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "bad");
        assert_eq!(result[1].text, "terrible");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let filter = LengthFilter::new(3);
        let tokens = vec![Token::new("é", 0), Token::new("éé", 1), Token::new("ééé", 2)];

        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "ééé");
    }
}
