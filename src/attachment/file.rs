//! Directory-backed attachment store.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, bounded};

use crate::attachment::{AttachmentStore, is_plain_file_id};
use crate::intent::types::AttachmentKind;

/// Default wait for one existence probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(250);

/// Documents and images in two directories.
///
/// Existence probes run on a helper thread; a probe that does not finish in
/// `probe_timeout` reports the file as missing.
#[derive(Debug, Clone)]
pub struct FileAttachmentStore {
    /// Root for [`AttachmentKind::Document`] files.
    documents_dir: PathBuf,
    /// Root for [`AttachmentKind::Image`] files.
    images_dir: PathBuf,
    /// Upper bound on one probe.
    probe_timeout: Duration,
}

impl FileAttachmentStore {
    /// Create a store over two directories. They need not exist yet.
    pub fn new<D: AsRef<Path>, I: AsRef<Path>>(documents_dir: D, images_dir: I) -> Self {
        FileAttachmentStore {
            documents_dir: documents_dir.as_ref().to_path_buf(),
            images_dir: images_dir.as_ref().to_path_buf(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Set the probe timeout.
    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    /// Probe timeout in use.
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Root directory for a kind.
    pub fn directory(&self, kind: AttachmentKind) -> &Path {
        match kind {
            AttachmentKind::Document => &self.documents_dir,
            AttachmentKind::Image => &self.images_dir,
        }
    }

    /// Full path of a file id, or `None` if the id is not a plain name.
    fn file_path(&self, kind: AttachmentKind, file_id: &str) -> Option<PathBuf> {
        if !is_plain_file_id(file_id) {
            log::warn!("Rejecting attachment id '{file_id}'");
            return None;
        }
        Some(self.directory(kind).join(file_id))
    }

    /// Check `path` on a short-lived thread, waiting at most `probe_timeout`.
    ///
    /// One thread per probe, up to four per request. A probe that times out
    /// leaves its thread detached until the filesystem call returns.
    fn probe(&self, path: PathBuf) -> bool {
        let (tx, rx) = bounded(1);
        let target = path.clone();
        let spawned = thread::Builder::new()
            .name("attachment-probe".to_string())
            .spawn(move || {
                let _ = tx.send(target.is_file());
            });
        if let Err(e) = spawned {
            log::warn!("Cannot start attachment probe for {}: {e}", path.display());
            return false;
        }

        match rx.recv_timeout(self.probe_timeout) {
            Ok(found) => found,
            Err(RecvTimeoutError::Timeout) => {
                log::warn!(
                    "Attachment probe for {} timed out after {:?}",
                    path.display(),
                    self.probe_timeout
                );
                false
            }
            Err(RecvTimeoutError::Disconnected) => false,
        }
    }
}

impl AttachmentStore for FileAttachmentStore {
    fn exists(&self, kind: AttachmentKind, file_id: &str) -> bool {
        match self.file_path(kind, file_id) {
            Some(path) => self.probe(path),
            None => false,
        }
    }

    fn resolve(&self, kind: AttachmentKind, file_id: &str) -> Option<PathBuf> {
        let path = self.file_path(kind, file_id)?;
        self.probe(path.clone()).then_some(path)
    }
}
