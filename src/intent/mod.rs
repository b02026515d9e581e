//! Intent resolution: from an utterance to a canonical answer.
//!
//! # Architecture
//!
//! - [`IntentResolver`]: common interface for the two backends
//! - [`RuleResolver`]: whole-word keyword counting over a [`RuleTable`]
//! - [`ClassifierResolver`]: feed-forward network over a bag-of-words vector
//! - [`PriorityOverrides`]: greetings and farewells, checked first
//! - [`FallbackPolicy`]: canned suggestions when nothing matched
//! - [`KnowledgeBase`]: intent key → [`Response`]
//!
//! # Example
//!
//! ```
//! use campus_faq::intent::{IntentResolver, RuleResolver, RuleTable};
//!
//! let rules = RuleTable::from_json_str(r#"{"library_opening": ["library", "opens"]}"#).unwrap();
//! let resolver = RuleResolver::new(rules);
//!
//! let resolution = resolver.resolve("When does the library open?");
//! assert_eq!(resolution.candidate().unwrap().intent, "library_opening");
//! ```

pub mod classifier_resolver;
pub mod fallback;
pub mod keywords;
pub mod knowledge;
pub mod model;
pub mod priority;
pub mod resolver;
pub mod rule_resolver;
pub mod rules;
pub mod types;

pub use classifier_resolver::{ClassifierResolver, DEFAULT_CONFIDENCE_THRESHOLD, is_confident};
pub use fallback::{FallbackCategory, FallbackPolicy};
pub use keywords::{Keyword, KeywordSet};
pub use knowledge::{IntentDefinition, IntentsDocument, KnowledgeBase};
pub use model::{ClassifierParameters, DenseLayer, FeedForwardNet};
pub use priority::{PriorityMatch, PriorityOverrides};
pub use resolver::{IntentResolver, ResolverSummary};
pub use rule_resolver::RuleResolver;
pub use rules::RuleTable;
pub use types::*;
