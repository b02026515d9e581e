//! Feature encoder: text → tokens → stems → multi-hot vector.
//!
//! The encoder must apply exactly the transform that produced the
//! classifier's vocabulary. Nothing checks this at runtime; a mismatched
//! tokenizer or stemmer only shows up as lower accuracy.
//!
//! # Examples
//!
//! ```
//! use campus_faq::analysis::encoder::FeatureEncoder;
//!
//! let encoder = FeatureEncoder::new().unwrap();
//! let vocabulary = encoder
//!     .build_vocabulary(&["When does the library open?", "Library hours"])
//!     .unwrap();
//!
//! let tokens = encoder.tokenize("Is the LIBRARY opening today?").unwrap();
//! let features = encoder.encode(&tokens, &vocabulary);
//!
//! assert_eq!(features.len(), vocabulary.len());
//! assert_eq!(features.active_count(), 3); // the, librari, open
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::{LowercaseFilter, PunctuationFilter, StemFilter, Stemmer};
use crate::analysis::token_filter::stem::PorterStemmer;
use crate::analysis::tokenizer::RegexTokenizer;
use crate::analysis::vocabulary::{FeatureVector, Vocabulary};
use crate::error::Result;

/// Turns raw questions into feature vectors over a fixed vocabulary.
#[derive(Clone)]
pub struct FeatureEncoder {
    /// Regex tokenizer + lowercase.
    words: PipelineAnalyzer,
    /// `words` + punctuation removal + stemming, the vocabulary transform.
    stems: PipelineAnalyzer,
    stemmer: Arc<dyn Stemmer>,
}

impl std::fmt::Debug for FeatureEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureEncoder")
            .field("words", &self.words)
            .field("stems", &self.stems)
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl FeatureEncoder {
    /// Create the encoder with the Porter stemmer.
    pub fn new() -> Result<Self> {
        Self::with_stemmer(Arc::new(PorterStemmer::new()))
    }

    /// Create the encoder with a custom stemmer.
    pub fn with_stemmer(stemmer: Arc<dyn Stemmer>) -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::new()?);
        let words = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("question_words");
        let stems = words
            .clone()
            .add_filter(Arc::new(PunctuationFilter::new()))
            .add_filter(Arc::new(StemFilter::with_stemmer(Arc::clone(&stemmer))))
            .with_name("question_stems");

        Ok(FeatureEncoder {
            words,
            stems,
            stemmer,
        })
    }

    /// Split text into lowercase tokens (punctuation included).
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.words.analyze(text)?.map(|token| token.text).collect())
    }

    /// Normalize one token to its stem.
    pub fn stem(&self, token: &str) -> String {
        self.stemmer.stem(token)
    }

    /// Multi-hot encode tokens over the vocabulary.
    ///
    /// Order and repetition are ignored; tokens whose stem is not in the
    /// vocabulary contribute nothing.
    pub fn encode(&self, tokens: &[String], vocabulary: &Vocabulary) -> FeatureVector {
        let stems: HashSet<String> = tokens.iter().map(|token| self.stem(token)).collect();

        let mut features = FeatureVector::zeros(vocabulary.len());
        for stem in &stems {
            if let Some(slot) = vocabulary.index_of(stem) {
                features.activate(slot);
            }
        }
        features
    }

    /// Tokenize and encode in one step.
    pub fn encode_text(&self, text: &str, vocabulary: &Vocabulary) -> Result<FeatureVector> {
        let tokens = self.tokenize(text)?;
        Ok(self.encode(&tokens, vocabulary))
    }

    /// Build a vocabulary from training patterns the way the training job does.
    pub fn build_vocabulary<S: AsRef<str>>(&self, patterns: &[S]) -> Result<Vocabulary> {
        let mut stems = Vec::new();
        for pattern in patterns {
            stems.extend(self.stems.analyze(pattern.as_ref())?.map(|token| token.text));
        }
        Ok(Vocabulary::new(stems))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_is_case_insensitive() {
        let encoder = FeatureEncoder::new().unwrap();
        assert_eq!(
            encoder.tokenize("Library HOURS?").unwrap(),
            vec!["library", "hours", "?"]
        );
    }

    #[test]
    fn test_build_vocabulary_ignores_punctuation() {
        let encoder = FeatureEncoder::new().unwrap();
        let vocabulary = encoder
            .build_vocabulary(&["Hello!", "Opening hours, please."])
            .unwrap();

        assert_eq!(vocabulary.words(), &["hello", "hour", "open", "pleas"]);
    }

    #[test]
    fn test_encode_multi_hot() {
        let encoder = FeatureEncoder::new().unwrap();
        let vocabulary = Vocabulary::new(["hour", "librari", "open"]);

        let features = encoder
            .encode_text("library library opening", &vocabulary)
            .unwrap();
        assert_eq!(features.values(), &[0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_empty_input_is_zero_vector() {
        let encoder = FeatureEncoder::new().unwrap();
        let vocabulary = Vocabulary::new(["hour", "librari"]);

        for text in ["", "   ", "?!.,"] {
            let features = encoder.encode_text(text, &vocabulary).unwrap();
            assert_eq!(features.len(), 2);
            assert_eq!(features.active_count(), 0);
        }
    }
}
