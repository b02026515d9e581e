//! Ordered intent → keyword table for the rule matcher.

use std::path::Path;

use indexmap::IndexMap;

use crate::error::{FaqError, Result};
use crate::intent::keywords::KeywordSet;

const BUILTIN_RULES: &str = include_str!("../../assets/rules.json");

/// Keyword rules in table order. Order decides ties.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<(String, KeywordSet)>,
}

impl RuleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. A repeated intent key replaces the earlier keywords but
    /// keeps its original position.
    pub fn push<S: Into<String>>(&mut self, intent: S, keywords: KeywordSet) {
        let intent = intent.into();
        match self.rules.iter_mut().find(|(key, _)| *key == intent) {
            Some(slot) => slot.1 = keywords,
            None => self.rules.push((intent, keywords)),
        }
    }

    /// Parse a `{ "intent": ["keyword", ...] }` object, keeping key order.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let entries: IndexMap<String, Vec<String>> = serde_json::from_str(content)
            .map_err(|e| FaqError::artifact(format!("rule table must map intents to keyword lists: {e}")))?;

        let mut table = RuleTable::new();
        for (intent, keywords) in entries {
            let keywords = KeywordSet::new(keywords)
                .map_err(|e| FaqError::artifact(format!("rule '{intent}': {e}")))?;
            if keywords.is_empty() {
                log::warn!("Rule '{intent}' has no keywords and can never match");
            }
            table.push(intent, keywords);
        }
        Ok(table)
    }

    /// Load a rule table from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// The university rule table shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_RULES)
    }

    /// Rules in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeywordSet)> {
        self.rules.iter().map(|(intent, keywords)| (intent.as_str(), keywords))
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_order_is_preserved() {
        let table = RuleTable::from_json_str(
            r#"{"zeta": ["z"], "alpha": ["a"], "mid": ["m", "M"]}"#,
        )
        .unwrap();

        let intents: Vec<&str> = table.iter().map(|(intent, _)| intent).collect();
        assert_eq!(intents, vec!["zeta", "alpha", "mid"]);
        assert_eq!(table.iter().nth(2).unwrap().1.len(), 1);
    }

    #[test]
    fn test_malformed_tables() {
        assert!(RuleTable::from_json_str(r#"["library"]"#).is_err());
        assert!(RuleTable::from_json_str(r#"{"library": "open"}"#).is_err());
        assert!(RuleTable::from_json_str(r#"{"library": [" "]}"#).is_err());
    }

    #[test]
    fn test_builtin_table() {
        let table = RuleTable::builtin().unwrap();
        assert!(table.len() >= 30);
        assert_eq!(table.iter().next().unwrap().0, "greeting_hello");
        assert!(table.iter().any(|(intent, _)| intent == "lab_access"));
    }
}
