//! Tokens flowing from the tokenizer through the filter chain.
//!
//! ```
//! use campus_faq::analysis::token::Token;
//!
//! let token = Token::new("Library", 3).with_text("library");
//! assert_eq!(token.text, "library");
//! assert_eq!(token.position, 3);
//! ```

/// One word or punctuation mark of a question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Current text; filters rewrite it in place.
    pub text: String,
    /// Index in the tokenizer output.
    pub position: usize,
}

impl Token {
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }

    /// Same token with new text.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

/// Boxed token iterator passed between pipeline stages.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
