//! # campus-faq
//!
//! Intent-resolution engine for a university FAQ assistant.
//!
//! ## Features
//!
//! - Whole-word keyword rules with deterministic tie-breaking
//! - Feed-forward classifier over a Porter-stemmed bag of words
//! - Greeting and farewell overrides, fallback suggestions
//! - Existence-checked document and image attachments
//! - Immutable engine state with atomic hot reload

pub mod analysis;
pub mod attachment;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod intent;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
