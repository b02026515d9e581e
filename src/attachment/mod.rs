//! Attachment store abstraction.
//!
//! Answers may point at a PDF or an image. A reference is only surfaced when
//! the store confirms, at resolution time, that the file exists; the engine
//! never caches that answer.
//!
//! # Stores
//!
//! - [`FileAttachmentStore`]: `documents/` and `images/` directories on disk,
//!   with a bounded wait on every existence probe
//! - [`MemoryAttachmentStore`]: in-memory set of file ids for tests
//!
//! # Example
//!
//! ```
//! use campus_faq::attachment::{AttachmentStore, MemoryAttachmentStore};
//! use campus_faq::intent::AttachmentKind;
//!
//! let store = MemoryAttachmentStore::new();
//! store.add(AttachmentKind::Document, "exam_schedule.pdf");
//!
//! assert!(store.exists(AttachmentKind::Document, "exam_schedule.pdf"));
//! assert!(!store.exists(AttachmentKind::Image, "exam_schedule.pdf"));
//! ```

use std::path::{Component, Path, PathBuf};

use crate::intent::types::AttachmentKind;

pub mod file;
pub mod memory;
pub mod policy;

pub use file::FileAttachmentStore;
pub use memory::MemoryAttachmentStore;
pub use policy::{AttachmentPolicy, AttachmentPolicyConfig, CohortSchedule, DocumentIntent};

/// Where attachment files live.
pub trait AttachmentStore: Send + Sync + std::fmt::Debug {
    /// Check whether a file exists right now.
    ///
    /// Must return `false` rather than block indefinitely or fail.
    fn exists(&self, kind: AttachmentKind, file_id: &str) -> bool;

    /// Location of a file for serving, if it exists.
    fn resolve(&self, kind: AttachmentKind, file_id: &str) -> Option<PathBuf>;
}

/// Check that a file id is a plain relative name that cannot leave the
/// store root.
pub fn is_plain_file_id(file_id: &str) -> bool {
    let path = Path::new(file_id);
    !file_id.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}
