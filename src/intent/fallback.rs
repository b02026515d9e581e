//! Fallback replies for utterances no backend matched.
//!
//! Categories are checked in a fixed order and the first one whose triggers
//! appear wins. The catch-all matches everything, so every string gets an
//! answer.

use crate::error::Result;
use crate::intent::keywords::KeywordSet;

/// Question types recognised by the fallback policy, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackCategory {
    Gratitude,
    Timing,
    Procedural,
    Informational,
    Justification,
    Person,
    Cost,
    Generic,
}

impl FallbackCategory {
    /// Every category in the order they are tried.
    pub const ORDER: [FallbackCategory; 8] = [
        FallbackCategory::Gratitude,
        FallbackCategory::Timing,
        FallbackCategory::Procedural,
        FallbackCategory::Informational,
        FallbackCategory::Justification,
        FallbackCategory::Person,
        FallbackCategory::Cost,
        FallbackCategory::Generic,
    ];

    fn triggers(&self) -> &'static [&'static str] {
        match self {
            FallbackCategory::Gratitude => &["thank", "thanks", "thank you"],
            FallbackCategory::Timing => &["when", "what time", "what date", "schedule", "hours"],
            FallbackCategory::Procedural => {
                &["how", "where can i", "how to", "where is", "how can i"]
            }
            FallbackCategory::Informational => {
                &["what", "tell me about", "information about", "explain"]
            }
            FallbackCategory::Justification => &["why", "reason", "purpose"],
            FallbackCategory::Person => &["who", "professor", "teacher", "head of"],
            FallbackCategory::Cost => &["cost", "price", "fee", "how much"],
            FallbackCategory::Generic => &[],
        }
    }

    /// Reply text for the category.
    pub fn reply(&self) -> &'static str {
        match self {
            FallbackCategory::Gratitude => {
                "You're welcome! 😊 Is there anything else about ESTIN I can help with?"
            }
            FallbackCategory::Timing => {
                "I can help with timing questions! Try asking about:\n• Library hours\n• Course schedules\n• Exam periods\n• Administration availability"
            }
            FallbackCategory::Procedural => {
                "I can assist with procedures and locations! Try asking about:\n• How to get a student certificate\n• Where to find administration\n• How to register for courses\n• Library access procedures"
            }
            FallbackCategory::Informational => {
                "I have information about ESTIN! Try asking about:\n• University specialties\n• Student clubs\n• Sports facilities\n• Academic programs"
            }
            FallbackCategory::Justification => {
                "I can explain university policies and procedures! Try asking about specific ESTIN rules or requirements."
            }
            FallbackCategory::Person => {
                "I can help you find people at ESTIN! Try asking about department heads or specific professors."
            }
            FallbackCategory::Cost => {
                "I have information about costs! Try asking about tuition fees or other university expenses."
            }
            FallbackCategory::Generic => {
                "I'm not sure I understand. I can help you with:\n• Course schedules and timetables\n• Library and administration hours\n• University procedures and documents\n• ESTIN facilities and services\n\nTry asking about specific ESTIN-related topics!"
            }
        }
    }
}

/// Picks a fallback category for an utterance.
#[derive(Debug, Clone)]
pub struct FallbackPolicy {
    categories: Vec<(FallbackCategory, KeywordSet)>,
}

impl FallbackPolicy {
    /// Compile the category triggers.
    pub fn new() -> Result<Self> {
        let categories = FallbackCategory::ORDER
            .iter()
            .filter(|category| **category != FallbackCategory::Generic)
            .map(|category| Ok((*category, KeywordSet::new(category.triggers().iter().copied())?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(FallbackPolicy { categories })
    }

    /// First category whose triggers appear, else the catch-all.
    pub fn classify(&self, utterance: &str) -> FallbackCategory {
        self.categories
            .iter()
            .find(|(_, triggers)| triggers.any_match(utterance))
            .map(|(category, _)| *category)
            .unwrap_or(FallbackCategory::Generic)
    }

    /// Reply for an utterance.
    pub fn respond(&self, utterance: &str) -> &'static str {
        self.classify(utterance).reply()
    }
}
