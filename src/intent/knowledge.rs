//! Knowledge base: intent key → canonical response.
//!
//! Two artifact shapes are accepted:
//!
//! - a flat object `{ "intent": "text" | ["text", ...] }`;
//! - an intents document `{ "intents": [ { "tag", "patterns", "response",
//!   "file" } ] }`, where `file` optionally names an attachment.
//!
//! Entries keep the order of the artifact. Malformed entries are skipped with
//! a warning so one bad answer does not take the whole table down.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{FaqError, Result};
use crate::intent::types::{Attachment, AttachmentKind, Response};

const BUILTIN_KNOWLEDGE: &str = include_str!("../../assets/knowledge.json");

/// Response text as it appears in artifacts.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ResponseText {
    One(String),
    Many(Vec<String>),
}

impl ResponseText {
    fn into_response(self) -> Result<Response> {
        match self {
            ResponseText::One(text) => Response::single(text),
            ResponseText::Many(texts) => Response::choices(texts),
        }
    }
}

/// Attachment metadata inside an intents document.
#[derive(Debug, Clone, Deserialize)]
pub struct FileMeta {
    /// `pdf`, `document`, `image`, `png`, ...
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// File name relative to the store.
    #[serde(alias = "file")]
    pub filename: String,
    /// Display name; the file name when absent.
    #[serde(default)]
    pub name: Option<String>,
}

impl FileMeta {
    fn to_attachment(&self) -> Attachment {
        let kind = match self.kind.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("image" | "png" | "jpg" | "jpeg" | "gif") => AttachmentKind::Image,
            _ => AttachmentKind::Document,
        };
        Attachment {
            kind,
            file_id: self.filename.clone(),
            display_name: self.name.clone().unwrap_or_else(|| self.filename.clone()),
        }
    }
}

/// One entry of an intents document.
#[derive(Debug, Clone, Deserialize)]
pub struct IntentDefinition {
    /// Intent key.
    pub tag: String,
    /// Training example questions.
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(alias = "responses")]
    response: ResponseText,
    /// Optional attachment metadata.
    #[serde(default)]
    pub file: Option<FileMeta>,
}

/// Intents document as produced for classifier training.
#[derive(Debug, Clone, Deserialize)]
pub struct IntentsDocument {
    /// Intent definitions in file order.
    pub intents: Vec<IntentDefinition>,
}

impl IntentsDocument {
    /// Read an intents document from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Every training pattern, in file order.
    pub fn patterns(&self) -> Vec<&str> {
        self.intents
            .iter()
            .flat_map(|intent| intent.patterns.iter().map(String::as_str))
            .collect()
    }
}

/// Read-only table of responses.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    responses: IndexMap<String, Response>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a response.
    pub fn insert<S: Into<String>>(&mut self, intent: S, response: Response) {
        self.responses.insert(intent.into(), response);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with<S: Into<String>>(mut self, intent: S, response: Response) -> Self {
        self.insert(intent, response);
        self
    }

    /// Parse a flat `{ intent: text | [text] }` object.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let entries: IndexMap<String, Value> = serde_json::from_str(content)
            .map_err(|e| FaqError::artifact(format!("knowledge table must be an object: {e}")))?;

        let mut knowledge = KnowledgeBase::new();
        for (intent, value) in entries {
            match serde_json::from_value::<ResponseText>(value)
                .map_err(FaqError::from)
                .and_then(ResponseText::into_response)
            {
                Ok(response) => knowledge.insert(intent, response),
                Err(e) => log::warn!("Skipping knowledge entry '{intent}': {e}"),
            }
        }
        Ok(knowledge)
    }

    /// Load a flat knowledge table from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// The university knowledge base shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_KNOWLEDGE)
    }

    /// Build from an intents document.
    pub fn from_intents(document: &IntentsDocument) -> Self {
        let mut knowledge = KnowledgeBase::new();
        for definition in &document.intents {
            match definition.response.clone().into_response() {
                Ok(response) => {
                    let response = match &definition.file {
                        Some(meta) => response.with_attachment(meta.to_attachment()),
                        None => response,
                    };
                    knowledge.insert(definition.tag.clone(), response);
                }
                Err(e) => log::warn!("Skipping intent '{}': {e}", definition.tag),
            }
        }
        knowledge
    }

    /// Add entries from `other` whose keys are not already present.
    pub fn merge(mut self, other: KnowledgeBase) -> Self {
        for (intent, response) in other.responses {
            self.responses.entry(intent).or_insert(response);
        }
        self
    }

    /// Response for an intent.
    pub fn get(&self, intent: &str) -> Option<&Response> {
        self.responses.get(intent)
    }

    /// Number of intents with a response.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Check if there are no responses.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Intent keys in artifact order.
    pub fn intents(&self) -> impl Iterator<Item = &str> {
        self.responses.keys().map(String::as_str)
    }
}
