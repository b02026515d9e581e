//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration: built-in rules and knowledge, rule backend, attachments
//! under `documents/` and `images/`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::attachment::AttachmentPolicyConfig;
use crate::error::{FaqError, Result};
use crate::intent::DEFAULT_CONFIDENCE_THRESHOLD;

/// Which backend answers first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Keyword rules.
    #[default]
    Rules,
    /// Feed-forward classifier.
    Classifier,
}

impl BackendKind {
    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Rules => "rules",
            BackendKind::Classifier => "classifier",
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = FaqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rules" => Ok(BackendKind::Rules),
            "classifier" => Ok(BackendKind::Classifier),
            other => Err(FaqError::config(format!("unknown backend '{other}'"))),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Primary backend.
    pub backend: BackendKind,
    /// Rule table; the built-in table when absent.
    pub rules_path: Option<PathBuf>,
    /// Flat knowledge table; the built-in table when absent.
    pub knowledge_path: Option<PathBuf>,
    /// Intents document merged into the knowledge table.
    pub intents_path: Option<PathBuf>,
    /// Classifier export; the classifier is unavailable when absent.
    pub model_path: Option<PathBuf>,
    /// Root for document attachments.
    pub documents_dir: PathBuf,
    /// Root for image attachments.
    pub images_dir: PathBuf,
    /// Minimum classifier probability, exclusive.
    pub confidence_threshold: f64,
    /// Upper bound on one attachment existence probe.
    pub probe_timeout_ms: u64,
    /// Seed for choosing among several answer texts.
    pub seed: Option<u64>,
    /// Attachment tables.
    pub attachments: AttachmentPolicyConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            backend: BackendKind::default(),
            rules_path: None,
            knowledge_path: None,
            intents_path: None,
            model_path: None,
            documents_dir: PathBuf::from("documents"),
            images_dir: PathBuf::from("images"),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            probe_timeout_ms: 250,
            seed: None,
            attachments: AttachmentPolicyConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Read and validate a JSON configuration file.
    ///
    /// Relative paths in the file are taken relative to the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FaqError::config(format!("cannot read {}: {e}", path.display())))?;
        let config: EngineConfig = serde_json::from_str(&content)
            .map_err(|e| FaqError::config(format!("invalid {}: {e}", path.display())))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let config = config.relative_to(base);
        config.validate()?;
        Ok(config)
    }

    /// Resolve relative paths against `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        let join = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.rules_path = self.rules_path.map(join);
        self.knowledge_path = self.knowledge_path.map(join);
        self.intents_path = self.intents_path.map(join);
        self.model_path = self.model_path.map(join);
        self.documents_dir = join(self.documents_dir);
        self.images_dir = join(self.images_dir);
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.confidence_threshold) {
            return Err(FaqError::config(format!(
                "confidence_threshold must be in [0, 1), got {}",
                self.confidence_threshold
            )));
        }
        if self.probe_timeout_ms == 0 {
            return Err(FaqError::config("probe_timeout_ms must be positive"));
        }
        if self.backend == BackendKind::Classifier && self.model_path.is_none() {
            log::warn!("Classifier backend selected without a model_path");
        }
        Ok(())
    }

    /// Probe timeout as a duration.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}
