//! Drops the sentence punctuation the vocabulary builder ignores.
//!
//! Only `?`, `!`, `,` and `.` are removed. Other symbols such as `'s` or `-`
//! stay, so the transform matches the one the classifier was trained with.
//!
//! ```
//! use campus_faq::analysis::token_filter::Filter;
//! use campus_faq::analysis::token_filter::punctuation::PunctuationFilter;
//! use campus_faq::analysis::token::Token;
//!
//! let tokens = vec![Token::new("hours", 0), Token::new("?", 1)];
//! let kept: Vec<_> = PunctuationFilter::new()
//!     .filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(kept, vec![Token::new("hours", 0)]);
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Marks ignored when building a vocabulary.
pub const IGNORED_MARKS: &[&str] = &["?", "!", ",", "."];

#[derive(Clone, Copy, Debug, Default)]
pub struct PunctuationFilter;

impl PunctuationFilter {
    pub fn new() -> Self {
        PunctuationFilter
    }

    /// Whether `text` is one of [`IGNORED_MARKS`].
    pub fn is_ignored(text: &str) -> bool {
        IGNORED_MARKS.contains(&text)
    }
}

impl Filter for PunctuationFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.filter(|token| !Self::is_ignored(&token.text))))
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn kept(texts: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Token::new(*t, i))
            .collect();
        PunctuationFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|token| token.text)
            .collect()
    }

    #[test]
    fn test_removes_sentence_marks() {
        assert_eq!(kept(&["hi", ",", "when", "?", "!", "."]), vec!["hi", "when"]);
    }

    #[test]
    fn test_keeps_other_symbols() {
        assert_eq!(kept(&["'s", "-", "@"]), vec!["'s", "-", "@"]);
    }
}
