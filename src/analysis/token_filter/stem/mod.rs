//! Stemming: the last stage before a token is looked up in the vocabulary.

use std::sync::Arc;

use super::{Filter, map_text};
use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod porter;

pub use porter::PorterStemmer;

/// Reduces a lowercase word to the form stored in vocabularies.
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;

    fn name(&self) -> &'static str;
}

/// Replaces each token with its stem.
#[derive(Clone)]
pub struct StemFilter {
    stemmer: Arc<dyn Stemmer>,
}

impl StemFilter {
    /// Stem with [`PorterStemmer`].
    pub fn new() -> Self {
        Self::with_stemmer(Arc::new(PorterStemmer::new()))
    }

    pub fn with_stemmer(stemmer: Arc<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StemFilter").field(&self.stemmer.name()).finish()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stemmer = Arc::clone(&self.stemmer);
        Ok(map_text(tokens, move |word| stemmer.stem(word)))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_stem_filter() {
        let tokens = vec![Token::new("running", 0), Token::new("skies", 1), Token::new("?", 2)];
        let stems: Vec<String> = StemFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|token| token.text)
            .collect();

        assert_eq!(stems, vec!["run", "sky", "?"]);
    }

    #[test]
    fn test_custom_stemmer() {
        struct Upper;
        impl Stemmer for Upper {
            fn stem(&self, word: &str) -> String {
                word.to_uppercase()
            }
            fn name(&self) -> &'static str {
                "upper"
            }
        }

        let filter = StemFilter::with_stemmer(Arc::new(Upper));
        let token = filter
            .filter(Box::new(std::iter::once(Token::new("gym", 0))))
            .unwrap()
            .next();
        assert_eq!(token, Some(Token::new("GYM", 0)));
        assert_eq!(format!("{filter:?}"), r#"StemFilter("upper")"#);
    }
}
