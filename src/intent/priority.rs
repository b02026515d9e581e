//! Greeting and farewell overrides, checked before any backend.

use crate::error::Result;
use crate::intent::keywords::KeywordSet;
use crate::intent::types::ResolutionSource;

/// Intent key for a plain greeting.
pub const GREETING_HELLO: &str = "greeting_hello";
/// Intent key for an informal greeting.
pub const GREETING_HI: &str = "greeting_hi";
/// Intent key for "how are you".
pub const GREETING_HOW_ARE_YOU: &str = "greeting_how_are_you";
/// Intent key for farewells.
pub const GREETING_GOODBYE: &str = "greeting_goodbye";

const GREETING_TRIGGERS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "how are you",
    "good morning",
    "good afternoon",
    "good evening",
];
const INFORMAL_TRIGGERS: &[&str] = &["hi", "hey"];
const HOW_ARE_YOU_TRIGGERS: &[&str] = &["how are you"];
const FAREWELL_TRIGGERS: &[&str] = &["bye", "goodbye", "see you", "quit", "exit"];

/// Text used when the knowledge base has no entry for a priority intent.
pub fn default_text(intent: &str) -> Option<&'static str> {
    match intent {
        GREETING_HELLO => Some("Hello! I'm the ESTIN assistant. How can I help you?"),
        GREETING_HI => Some("Hi there! What would you like to know about ESTIN?"),
        GREETING_HOW_ARE_YOU => Some("I'm doing well, thanks for asking! How can I help you today?"),
        GREETING_GOODBYE => Some("Goodbye! Good luck with your studies."),
        _ => None,
    }
}

/// An override decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityMatch {
    /// One of the greeting intent keys.
    pub intent: &'static str,
    /// Greeting or farewell.
    pub source: ResolutionSource,
}

/// Detects greetings and farewells.
#[derive(Debug, Clone)]
pub struct PriorityOverrides {
    greeting: KeywordSet,
    informal: KeywordSet,
    how_are_you: KeywordSet,
    farewell: KeywordSet,
}

impl PriorityOverrides {
    /// Compile the trigger lists.
    pub fn new() -> Result<Self> {
        Ok(PriorityOverrides {
            greeting: KeywordSet::new(GREETING_TRIGGERS.iter().copied())?,
            informal: KeywordSet::new(INFORMAL_TRIGGERS.iter().copied())?,
            how_are_you: KeywordSet::new(HOW_ARE_YOU_TRIGGERS.iter().copied())?,
            farewell: KeywordSet::new(FAREWELL_TRIGGERS.iter().copied())?,
        })
    }

    /// Check an utterance. Greetings win over farewells.
    pub fn detect(&self, utterance: &str) -> Option<PriorityMatch> {
        if self.greeting.any_match(utterance) {
            let intent = if self.how_are_you.any_match(utterance) {
                GREETING_HOW_ARE_YOU
            } else if self.informal.any_match(utterance) {
                GREETING_HI
            } else {
                GREETING_HELLO
            };
            return Some(PriorityMatch {
                intent,
                source: ResolutionSource::Greeting,
            });
        }

        if self.farewell.any_match(utterance) {
            return Some(PriorityMatch {
                intent: GREETING_GOODBYE,
                source: ResolutionSource::Farewell,
            });
        }

        None
    }
}
