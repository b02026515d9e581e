//! Which attachment, if any, goes with an answer.
//!
//! Candidates are tried in order and the first one the store confirms is
//! attached:
//!
//! 1. the matched response's own attachment;
//! 2. the document table entry for the matched intent;
//! 3. the cohort schedule, when the utterance asks for a schedule, program or
//!    timetable and names a cohort: its PDF, then its image.

use serde::{Deserialize, Serialize};

use crate::attachment::AttachmentStore;
use crate::error::Result;
use crate::intent::keywords::KeywordSet;
use crate::intent::types::{Attachment, Response};

/// A document that always accompanies an intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentIntent {
    /// Intent key.
    pub intent: String,
    /// File id in the documents directory.
    pub file: String,
    /// Display name.
    pub name: String,
}

impl DocumentIntent {
    fn new(intent: &str, file: &str, name: &str) -> Self {
        DocumentIntent {
            intent: intent.to_string(),
            file: file.to_string(),
            name: name.to_string(),
        }
    }
}

/// Timetable files for one cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortSchedule {
    /// Cohort label for logging.
    pub name: String,
    /// Words that name the cohort.
    pub triggers: Vec<String>,
    /// PDF file id.
    pub document: String,
    /// Display name of the PDF.
    pub document_name: String,
    /// Image file id.
    pub image: String,
    /// Display name of the image.
    pub image_name: String,
}

impl CohortSchedule {
    fn new(name: &str, triggers: &[&str], stem: &str) -> Self {
        CohortSchedule {
            name: name.to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            document: format!("{stem}.pdf"),
            document_name: format!("{name} Schedule PDF"),
            image: format!("{stem}.png"),
            image_name: format!("{name} Schedule"),
        }
    }
}

/// Attachment tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentPolicyConfig {
    /// Words that make an utterance a schedule request.
    pub schedule_words: Vec<String>,
    /// Cohorts in the order they are checked. Only the first named cohort
    /// is considered.
    pub cohorts: Vec<CohortSchedule>,
    /// Intents that always carry a document.
    pub documents: Vec<DocumentIntent>,
}

impl Default for AttachmentPolicyConfig {
    fn default() -> Self {
        AttachmentPolicyConfig {
            schedule_words: vec![
                "schedule".to_string(),
                "program".to_string(),
                "timetable".to_string(),
            ],
            cohorts: vec![
                CohortSchedule::new("2CS", &["2cs", "second"], "2cs_schedule"),
                CohortSchedule::new("1st Year", &["1st", "first"], "1st_year_schedule"),
                CohortSchedule::new("3rd Year", &["3rd", "third"], "3rd_year_schedule"),
            ],
            documents: vec![
                DocumentIntent::new("academic_calendar_pdf", "academic_calendar.pdf", "Academic Calendar"),
                DocumentIntent::new("course_catalog_pdf", "course_catalog.pdf", "Course Catalog"),
                DocumentIntent::new("exam_schedule_pdf", "exam_schedule.pdf", "Exam Schedule"),
                DocumentIntent::new("registration_guide_pdf", "registration_guide.pdf", "Registration Guide"),
                DocumentIntent::new("student_handbook_pdf", "student_handbook.pdf", "Student Handbook"),
            ],
        }
    }
}

/// Compiled attachment tables.
#[derive(Debug, Clone)]
pub struct AttachmentPolicy {
    config: AttachmentPolicyConfig,
    schedule_words: KeywordSet,
    cohorts: Vec<KeywordSet>,
}

impl AttachmentPolicy {
    /// Compile the keyword lists of a configuration.
    pub fn new(config: AttachmentPolicyConfig) -> Result<Self> {
        let schedule_words = KeywordSet::new(config.schedule_words.iter().cloned())?;
        let cohorts = config
            .cohorts
            .iter()
            .map(|cohort| KeywordSet::new(cohort.triggers.iter().cloned()))
            .collect::<Result<Vec<_>>>()?;
        Ok(AttachmentPolicy {
            config,
            schedule_words,
            cohorts,
        })
    }

    /// The tables this policy was built from.
    pub fn config(&self) -> &AttachmentPolicyConfig {
        &self.config
    }

    /// Candidates in priority order, before any existence check.
    pub fn candidates(
        &self,
        utterance: &str,
        intent: Option<&str>,
        response: Option<&Response>,
    ) -> Vec<Attachment> {
        let mut candidates = Vec::new();

        if let Some(attachment) = response.and_then(Response::attachment) {
            candidates.push(attachment.clone());
        }

        if let Some(intent) = intent {
            if let Some(entry) = self.config.documents.iter().find(|d| d.intent == intent) {
                candidates.push(Attachment::document(&entry.file, &entry.name));
            }
        }

        if self.schedule_words.any_match(utterance) {
            let cohort = self
                .config
                .cohorts
                .iter()
                .zip(&self.cohorts)
                .find(|(_, triggers)| triggers.any_match(utterance))
                .map(|(cohort, _)| cohort);
            if let Some(cohort) = cohort {
                candidates.push(Attachment::document(&cohort.document, &cohort.document_name));
                candidates.push(Attachment::image(&cohort.image, &cohort.image_name));
            }
        }

        candidates
    }

    /// First candidate the store confirms exists.
    pub fn select(
        &self,
        store: &dyn AttachmentStore,
        utterance: &str,
        intent: Option<&str>,
        response: Option<&Response>,
    ) -> Option<Attachment> {
        self.candidates(utterance, intent, response)
            .into_iter()
            .find(|candidate| {
                let found = store.exists(candidate.kind, &candidate.file_id);
                if !found {
                    log::debug!(
                        "Skipping missing {} '{}'",
                        candidate.kind.as_str(),
                        candidate.file_id
                    );
                }
                found
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::MemoryAttachmentStore;
    use crate::intent::types::AttachmentKind;

    fn policy() -> AttachmentPolicy {
        AttachmentPolicy::new(AttachmentPolicyConfig::default()).unwrap()
    }

    #[test]
    fn test_cohort_pdf_preferred_over_image() {
        let store = MemoryAttachmentStore::new();
        store.add(AttachmentKind::Image, "2cs_schedule.png");

        let selected = policy().select(&store, "2cs schedule please", None, None).unwrap();
        assert_eq!(selected, Attachment::image("2cs_schedule.png", "2CS Schedule"));

        store.add(AttachmentKind::Document, "2cs_schedule.pdf");
        let selected = policy().select(&store, "2cs schedule please", None, None).unwrap();
        assert_eq!(selected, Attachment::document("2cs_schedule.pdf", "2CS Schedule PDF"));
    }

    #[test]
    fn test_cohort_needs_schedule_word() {
        let candidates = policy().candidates("second year clubs", None, None);
        assert!(candidates.is_empty());

        let candidates = policy().candidates("third year timetable", None, None);
        assert_eq!(candidates[0].file_id, "3rd_year_schedule.pdf");
    }

    #[test]
    fn test_only_first_named_cohort() {
        let store = MemoryAttachmentStore::new();
        store.add(AttachmentKind::Document, "1st_year_schedule.pdf");

        // 2CS is named first in the table, so 1st year is never considered.
        assert!(policy().select(&store, "2cs or first year program", None, None).is_none());
        assert!(policy().select(&store, "first year program", None, None).is_some());
    }

    #[test]
    fn test_intent_document_before_cohort() {
        let store = MemoryAttachmentStore::new();
        store.add(AttachmentKind::Document, "exam_schedule.pdf");
        store.add(AttachmentKind::Document, "2cs_schedule.pdf");

        let selected = policy()
            .select(&store, "2cs exam schedule", Some("exam_schedule_pdf"), None)
            .unwrap();
        assert_eq!(selected.file_id, "exam_schedule.pdf");
        assert_eq!(selected.display_name, "Exam Schedule");
    }

    #[test]
    fn test_response_attachment_first_and_gated() {
        let store = MemoryAttachmentStore::new();
        let response = Response::single("Here is the map.")
            .unwrap()
            .with_attachment(Attachment::image("map.png", "Map"));

        assert!(policy().select(&store, "map", Some("campus_map"), Some(&response)).is_none());

        store.add(AttachmentKind::Image, "map.png");
        let selected = policy().select(&store, "map", Some("campus_map"), Some(&response));
        assert_eq!(selected, Some(Attachment::image("map.png", "Map")));
    }

    #[test]
    fn test_config_json_defaults() {
        let config: AttachmentPolicyConfig =
            serde_json::from_str(r#"{"schedule_words": ["agenda"]}"#).unwrap();
        assert_eq!(config.schedule_words, vec!["agenda"]);
        assert_eq!(config.cohorts.len(), 3);
        assert_eq!(config.documents.len(), 5);
    }
}
