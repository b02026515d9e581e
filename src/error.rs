//! Error types for the campus-faq engine.
//!
//! All fallible operations return [`FaqError`] through the crate-wide
//! [`Result`] alias. Note that resolving an utterance never fails: errors only
//! surface while loading artifacts and configuration, and a failed artifact
//! disables the backend that needed it instead of aborting the engine.
//!
//! # Examples
//!
//! ```
//! use campus_faq::error::{FaqError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(FaqError::artifact("rules.json is not an object"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("Loaded"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for campus-faq operations.
#[derive(Error, Debug)]
pub enum FaqError {
    /// I/O errors (artifact files, attachment probes)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Artifact content errors (rules, knowledge, intents files)
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Classifier parameter errors (shapes, missing layers)
    #[error("Model error: {0}")]
    Model(String),
}

/// Result type alias for operations that may fail with FaqError.
pub type Result<T> = std::result::Result<T, FaqError>;

impl FaqError {
    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        FaqError::Artifact(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        FaqError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        FaqError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        FaqError::Model(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = FaqError::artifact("bad rules");
        assert_eq!(error.to_string(), "Artifact error: bad rules");

        let error = FaqError::model("layer shape mismatch");
        assert_eq!(error.to_string(), "Model error: layer shape mismatch");

        let error = FaqError::config("threshold out of range");
        assert_eq!(
            error.to_string(),
            "Configuration error: threshold out of range"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let faq_error = FaqError::from(io_error);

        match faq_error {
            FaqError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
