//! Whole-word keyword matching.
//!
//! A keyword matches when it appears in the utterance delimited by word
//! boundaries, ignoring case: `"hi"` matches `"Hi there"` but not `"this"`.
//! Multi-word keywords (`"what time"`) match as a phrase.

use regex::Regex;

use crate::error::{FaqError, Result};

/// A single compiled keyword.
#[derive(Debug, Clone)]
pub struct Keyword {
    text: String,
    pattern: Regex,
}

impl Keyword {
    /// Compile a keyword. The text is matched literally.
    pub fn new<S: Into<String>>(text: S) -> Result<Self> {
        let text = text.into().trim().to_lowercase();
        if text.is_empty() {
            return Err(FaqError::artifact("keywords must not be blank"));
        }
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&text)))
            .map_err(|e| FaqError::artifact(format!("invalid keyword '{text}': {e}")))?;
        Ok(Keyword { text, pattern })
    }

    /// Keyword text, lowercased.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check whether the keyword occurs as a whole word.
    pub fn is_match(&self, utterance: &str) -> bool {
        self.pattern.is_match(utterance)
    }
}

/// A set of distinct keywords.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    keywords: Vec<Keyword>,
}

impl KeywordSet {
    /// Compile keywords, dropping duplicates (case-insensitive) but keeping
    /// first-seen order.
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut compiled: Vec<Keyword> = Vec::new();
        for keyword in keywords {
            let keyword = Keyword::new(keyword)?;
            if !compiled.iter().any(|k| k.text == keyword.text) {
                compiled.push(keyword);
            }
        }
        Ok(KeywordSet { keywords: compiled })
    }

    /// Number of distinct keywords present in the utterance.
    pub fn count_matches(&self, utterance: &str) -> usize {
        self.keywords.iter().filter(|k| k.is_match(utterance)).count()
    }

    /// Check whether any keyword is present.
    pub fn any_match(&self, utterance: &str) -> bool {
        self.keywords.iter().any(|k| k.is_match(utterance))
    }

    /// Keyword texts in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(Keyword::text)
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_only() {
        let hi = Keyword::new("hi").unwrap();
        assert!(hi.is_match("hi there"));
        assert!(hi.is_match("oh, HI!"));
        assert!(!hi.is_match("this library"));
        assert!(!hi.is_match("which one"));
    }

    #[test]
    fn test_phrases_and_special_characters() {
        let phrase = Keyword::new("What time").unwrap();
        assert!(phrase.is_match("what time does it open"));
        assert!(!phrase.is_match("what timetable"));

        let contraction = Keyword::new("what's up").unwrap();
        assert!(contraction.is_match("yo what's up"));

        let dotted = Keyword::new("e.g").unwrap();
        assert!(!dotted.is_match("egg"));
    }

    #[test]
    fn test_distinct_counting() {
        let set = KeywordSet::new(["library", "opens", "Library", "what time"]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.count_matches("library library opens"), 2);
        assert_eq!(set.count_matches("what time does the library open"), 2);
        assert_eq!(set.count_matches(""), 0);
    }

    #[test]
    fn test_blank_keyword_rejected() {
        assert!(Keyword::new("  ").is_err());
    }
}
