//! Lowercasing, the first normalization of every question.

use super::{Filter, map_text};
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Lowercases token text. Positions are kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(map_text(tokens, str::to_lowercase))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
