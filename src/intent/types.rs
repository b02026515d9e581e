//! Common types for intent resolution.

use serde::{Deserialize, Serialize};

use crate::error::{FaqError, Result};

/// Kind of file an attachment points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// PDF or other downloadable document.
    Document,
    /// Inline image.
    Image,
}

impl AttachmentKind {
    /// Lowercase label used in JSON and log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Document => "document",
            AttachmentKind::Image => "image",
        }
    }
}

/// Reference to a file in the attachment store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Document or image.
    pub kind: AttachmentKind,
    /// File name relative to the store directory for `kind`.
    pub file_id: String,
    /// Name shown to the student.
    pub display_name: String,
}

impl Attachment {
    /// Create a document attachment.
    pub fn document<S: Into<String>, N: Into<String>>(file_id: S, display_name: N) -> Self {
        Attachment {
            kind: AttachmentKind::Document,
            file_id: file_id.into(),
            display_name: display_name.into(),
        }
    }

    /// Create an image attachment.
    pub fn image<S: Into<String>, N: Into<String>>(file_id: S, display_name: N) -> Self {
        Attachment {
            kind: AttachmentKind::Image,
            file_id: file_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Canonical answer for an intent.
///
/// `texts` is never empty and no text is blank; a single answer is a
/// one-element list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    texts: Vec<String>,
    attachment: Option<Attachment>,
}

impl Response {
    /// Response with one text.
    pub fn single<S: Into<String>>(text: S) -> Result<Self> {
        Self::choices([text])
    }

    /// Response with several equally valid texts.
    pub fn choices<I, S>(texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts: Vec<String> = texts.into_iter().map(Into::into).collect();
        if texts.is_empty() {
            return Err(FaqError::artifact("a response needs at least one text"));
        }
        if texts.iter().any(|text| text.trim().is_empty()) {
            return Err(FaqError::artifact("response texts must not be blank"));
        }
        Ok(Response {
            texts,
            attachment: None,
        })
    }

    /// Attach a file to this response.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// All texts, in declaration order.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// The first text; used when the choice must be deterministic.
    pub fn primary_text(&self) -> &str {
        &self.texts[0]
    }

    /// Declared attachment, if any.
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }
}

/// A backend's best guess for an utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Matched intent key.
    pub intent: String,
    /// Keyword count for rules, probability for the classifier.
    pub score: f64,
}

/// Outcome of asking one backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Confident match.
    Matched(Candidate),
    /// Nothing scored, or confidence at or below the threshold.
    NoMatch,
    /// The backend's artifacts failed to load; it never answers.
    Unavailable,
}

impl Resolution {
    /// Candidate if matched.
    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            Resolution::Matched(candidate) => Some(candidate),
            _ => None,
        }
    }
}

/// Which stage produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Greeting,
    Farewell,
    Rules,
    Classifier,
    Fallback,
}

/// Final answer for one utterance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionResult {
    /// Answer text, never empty.
    pub text: String,
    /// Attachment confirmed to exist at resolution time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    /// Matched intent key, absent for fallback answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    /// Score of the match, 0.0 for fallback answers.
    pub score: f64,
    /// Stage that produced the answer.
    pub source: ResolutionSource,
}
