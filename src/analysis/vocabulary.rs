//! Vocabulary of stemmed word-forms.
//!
//! The vocabulary fixes the dimensionality of feature vectors and the slot
//! each stem occupies. Vocabularies built here are sorted and deduplicated,
//! so two vocabularies built from the same stems agree on the index mapping.
//! Vocabularies read from a model artifact keep the artifact's order, since
//! the weights were trained against it.

use std::collections::HashMap;

use serde::Serialize;

use crate::analysis::encoder::FeatureEncoder;
use crate::error::{FaqError, Result};

/// Ordered set of stems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<String>")]
pub struct Vocabulary {
    /// Stems in slot order.
    words: Vec<String>,
    /// Stem -> slot mapping.
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Create a vocabulary from any collection of stems.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = words.into_iter().map(Into::into).collect();
        words.sort();
        words.dedup();

        let index = words
            .iter()
            .enumerate()
            .map(|(slot, word)| (word.clone(), slot))
            .collect();

        Vocabulary { words, index }
    }

    /// Build the vocabulary the training job would build from these
    /// patterns: Porter stems of every word, punctuation ignored.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        FeatureEncoder::new()?.build_vocabulary(patterns)
    }

    /// Take a vocabulary verbatim from a model artifact.
    ///
    /// Slot order is preserved; duplicate or blank entries are rejected.
    pub fn from_artifact(words: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(words.len());
        for (slot, word) in words.iter().enumerate() {
            if word.is_empty() {
                return Err(FaqError::artifact(format!("blank vocabulary entry at {slot}")));
            }
            if index.insert(word.clone(), slot).is_some() {
                return Err(FaqError::artifact(format!("duplicate vocabulary entry '{word}'")));
            }
        }
        if words.windows(2).any(|pair| pair[0] > pair[1]) {
            log::warn!("Model vocabulary is not sorted; using artifact order");
        }
        Ok(Vocabulary { words, index })
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the vocabulary has no entries.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Stems in slot order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Slot of a stem, if known.
    pub fn index_of(&self, stem: &str) -> Option<usize> {
        self.index.get(stem).copied()
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.words
    }
}

/// Multi-hot feature vector, one slot per vocabulary entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// All-zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        FeatureVector(vec![0.0; dimension])
    }

    /// Set a slot to 1.0.
    pub fn activate(&mut self, slot: usize) {
        self.0[slot] = 1.0;
    }

    /// Dimension of the vector.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the vector has zero dimension.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of active slots.
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|&&v| v != 0.0).count()
    }

    /// Raw slot values.
    pub fn values(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        FeatureVector(values)
    }
}
