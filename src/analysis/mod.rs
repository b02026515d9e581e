//! Text analysis for the intent engine.
//!
//! Tokenization, filtering and stemming are composed through
//! [`analyzer::PipelineAnalyzer`]; [`encoder::FeatureEncoder`] turns the
//! result into feature vectors over a fixed [`vocabulary::Vocabulary`].

pub mod analyzer;
pub mod encoder;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
pub mod vocabulary;

pub use analyzer::*;
pub use encoder::FeatureEncoder;
pub use token::*;
pub use vocabulary::{FeatureVector, Vocabulary};
