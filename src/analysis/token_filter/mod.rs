//! Token filters applied after tokenization.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A stage that rewrites or drops tokens.
pub trait Filter: Send + Sync {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Short name shown in debug output.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod punctuation;
pub mod stem;

pub use lowercase::LowercaseFilter;
pub use punctuation::PunctuationFilter;
pub use stem::{PorterStemmer, StemFilter, Stemmer};

/// Lazily rewrite the text of every token.
fn map_text<F>(tokens: TokenStream, f: F) -> TokenStream
where
    F: Fn(&str) -> String + 'static,
{
    Box::new(tokens.map(move |token| {
        let text = f(&token.text);
        token.with_text(text)
    }))
}
