//! Keyword rule resolver.

use std::path::Path;

use crate::intent::resolver::{IntentResolver, ResolverSummary};
use crate::intent::rules::RuleTable;
use crate::intent::types::{Candidate, Resolution, ResolutionSource};

/// Scores every rule by distinct whole-word keyword hits and picks the best.
///
/// Ties go to the rule that comes first in the table. A best score of zero
/// is no match, never an arbitrary intent.
#[derive(Debug, Clone)]
pub struct RuleResolver {
    rules: Option<RuleTable>,
}

impl RuleResolver {
    /// Create a resolver over a loaded table.
    pub fn new(rules: RuleTable) -> Self {
        RuleResolver { rules: Some(rules) }
    }

    /// A resolver whose table failed to load.
    pub fn unavailable() -> Self {
        RuleResolver { rules: None }
    }

    /// Load the table at `path`; on failure the resolver is disabled.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match RuleTable::from_file(path) {
            Ok(rules) => {
                log::info!("Loaded {} rules from {}", rules.len(), path.display());
                Self::new(rules)
            }
            Err(e) => {
                log::warn!("Rule matcher disabled, cannot load {}: {e}", path.display());
                Self::unavailable()
            }
        }
    }

    /// The loaded table.
    pub fn rules(&self) -> Option<&RuleTable> {
        self.rules.as_ref()
    }
}

impl IntentResolver for RuleResolver {
    fn resolve(&self, utterance: &str) -> Resolution {
        let Some(rules) = &self.rules else {
            return Resolution::Unavailable;
        };

        let lowered = utterance.to_lowercase();
        let mut best: Option<(&str, usize)> = None;
        for (intent, keywords) in rules.iter() {
            let score = keywords.count_matches(&lowered);
            // Strict comparison keeps the earliest rule on ties.
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((intent, score));
            }
        }

        match best {
            Some((intent, score)) if score > 0 => Resolution::Matched(Candidate {
                intent: intent.to_string(),
                score: score as f64,
            }),
            _ => Resolution::NoMatch,
        }
    }

    fn name(&self) -> &str {
        "rules"
    }

    fn source(&self) -> ResolutionSource {
        ResolutionSource::Rules
    }

    fn is_available(&self) -> bool {
        self.rules.is_some()
    }

    fn summary(&self) -> ResolverSummary {
        let details = match &self.rules {
            Some(rules) => vec![("rules".to_string(), rules.len().to_string())],
            None => Vec::new(),
        };
        ResolverSummary {
            name: self.name().to_string(),
            available: self.is_available(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(json: &str) -> RuleResolver {
        RuleResolver::new(RuleTable::from_json_str(json).unwrap())
    }

    #[test]
    fn test_best_score_wins() {
        let resolver = resolver(
            r#"{
                "library_opening": ["library", "opens", "opening"],
                "library_closing": ["library", "closes", "closing"]
            }"#,
        );

        let resolution = resolver.resolve("When does the Library close? closing time");
        assert_eq!(
            resolution,
            Resolution::Matched(Candidate {
                intent: "library_closing".to_string(),
                score: 2.0,
            })
        );
    }

    #[test]
    fn test_tie_goes_to_first_rule() {
        let resolver = resolver(r#"{"x": ["library"], "y": ["library"]}"#);
        for _ in 0..5 {
            assert_eq!(resolver.resolve("library").candidate().unwrap().intent, "x");
        }

        let reversed = RuleResolver::new(
            RuleTable::from_json_str(r#"{"y": ["library"], "x": ["library"]}"#).unwrap(),
        );
        assert_eq!(reversed.resolve("library").candidate().unwrap().intent, "y");
    }

    #[test]
    fn test_zero_score_is_no_match() {
        let resolver = resolver(r#"{"x": ["library"], "y": ["exam"]}"#);
        assert_eq!(resolver.resolve("parking"), Resolution::NoMatch);
        assert_eq!(resolver.resolve(""), Resolution::NoMatch);
        assert_eq!(resolver.resolve("libraryexam"), Resolution::NoMatch);

        let empty = RuleResolver::new(RuleTable::new());
        assert_eq!(empty.resolve("library"), Resolution::NoMatch);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let resolver = resolver(r#"{"x": ["library"], "y": ["exam", "dates"]}"#);
        let candidate = resolver.resolve("library library library exam dates");
        assert_eq!(candidate.candidate().unwrap().intent, "y");
    }

    #[test]
    fn test_unavailable() {
        let resolver = RuleResolver::load("/nonexistent/rules.json");
        assert!(!resolver.is_available());
        assert_eq!(resolver.resolve("library"), Resolution::Unavailable);
    }
}
