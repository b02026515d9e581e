//! In-memory attachment store for tests.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::attachment::{AttachmentStore, is_plain_file_id};
use crate::intent::types::AttachmentKind;

/// An attachment store backed by a set of file ids.
#[derive(Debug, Default)]
pub struct MemoryAttachmentStore {
    files: RwLock<HashSet<(AttachmentKind, String)>>,
}

impl MemoryAttachmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file.
    pub fn add<S: Into<String>>(&self, kind: AttachmentKind, file_id: S) {
        self.files.write().insert((kind, file_id.into()));
    }

    /// Forget a file. Returns whether it was present.
    pub fn remove(&self, kind: AttachmentKind, file_id: &str) -> bool {
        self.files.write().remove(&(kind, file_id.to_string()))
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// Check if no files are registered.
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

impl AttachmentStore for MemoryAttachmentStore {
    fn exists(&self, kind: AttachmentKind, file_id: &str) -> bool {
        is_plain_file_id(file_id) && self.files.read().contains(&(kind, file_id.to_string()))
    }

    fn resolve(&self, kind: AttachmentKind, file_id: &str) -> Option<PathBuf> {
        self.exists(kind, file_id)
            .then(|| Path::new(kind.as_str()).join(file_id))
    }
}
