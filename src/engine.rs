//! Resolution orchestrator.
//!
//! [`FaqEngine::resolve`] runs, in order:
//!
//! 1. the greeting and farewell overrides;
//! 2. the primary backend, with the other backend standing in only when the
//!    primary is unavailable;
//! 3. the fallback policy when nothing matched;
//!
//! then picks an attachment the store confirms exists.
//!
//! All tables live in an immutable [`EngineState`]. The engine holds it
//! behind an `Arc` and [`FaqEngine::reload`] swaps the whole bundle, so a
//! request always sees one consistent state.
//!
//! # Example
//!
//! ```
//! use campus_faq::engine::FaqEngine;
//! use campus_faq::config::EngineConfig;
//!
//! let engine = FaqEngine::from_config(&EngineConfig::default()).unwrap();
//! let result = engine.resolve("What time does the library open?");
//! assert_eq!(result.intent.as_deref(), Some("library_opening"));
//! ```

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::attachment::{
    AttachmentPolicy, AttachmentPolicyConfig, AttachmentStore, FileAttachmentStore,
    MemoryAttachmentStore,
};
use crate::config::{BackendKind, EngineConfig};
use crate::error::Result;
use crate::intent::priority::{self, PriorityOverrides};
use crate::intent::{
    ClassifierResolver, FallbackPolicy, IntentResolver, IntentsDocument, KnowledgeBase,
    Resolution, ResolutionResult, ResolutionSource, ResolverSummary, Response, RuleResolver,
    RuleTable,
};

/// Answer for a matched intent that has no knowledge entry.
pub const NO_ANSWER_TEXT: &str = "I'm sorry, I don't have an answer for that yet.";

/// Everything a request reads. Never mutated after construction.
#[derive(Clone)]
pub struct EngineState {
    primary: Arc<dyn IntentResolver>,
    secondary: Option<Arc<dyn IntentResolver>>,
    knowledge: KnowledgeBase,
    priority: PriorityOverrides,
    fallback: FallbackPolicy,
    attachments: AttachmentPolicy,
    store: Arc<dyn AttachmentStore>,
}

impl std::fmt::Debug for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineState")
            .field("primary", &self.primary.name())
            .field("secondary", &self.secondary.as_ref().map(|r| r.name().to_string()))
            .field("knowledge", &self.knowledge.len())
            .field("store", &self.store)
            .finish()
    }
}

impl EngineState {
    /// Create a state with one backend, the default attachment tables and an
    /// empty in-memory attachment store.
    pub fn new(primary: Arc<dyn IntentResolver>, knowledge: KnowledgeBase) -> Result<Self> {
        Ok(EngineState {
            primary,
            secondary: None,
            knowledge,
            priority: PriorityOverrides::new()?,
            fallback: FallbackPolicy::new()?,
            attachments: AttachmentPolicy::new(AttachmentPolicyConfig::default())?,
            store: Arc::new(MemoryAttachmentStore::new()),
        })
    }

    /// Set the backend that stands in when the primary is unavailable.
    pub fn with_secondary(mut self, secondary: Arc<dyn IntentResolver>) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// Set the attachment store.
    pub fn with_attachment_store(mut self, store: Arc<dyn AttachmentStore>) -> Self {
        self.store = store;
        self
    }

    /// Set the attachment tables.
    pub fn with_attachment_policy(mut self, attachments: AttachmentPolicy) -> Self {
        self.attachments = attachments;
        self
    }

    /// Load every artifact named by a configuration.
    ///
    /// Artifacts that fail to load disable the backend that needs them; only
    /// an invalid configuration or attachment table is an error.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let rules = match &config.rules_path {
            Some(path) => RuleResolver::load(path),
            None => match RuleTable::builtin() {
                Ok(table) => RuleResolver::new(table),
                Err(e) => {
                    log::warn!("Rule matcher disabled, built-in table is invalid: {e}");
                    RuleResolver::unavailable()
                }
            },
        };

        let classifier = match &config.model_path {
            Some(path) => ClassifierResolver::load(path),
            None => ClassifierResolver::unavailable(),
        }
        .with_threshold(config.confidence_threshold);

        let rules: Arc<dyn IntentResolver> = Arc::new(rules);
        let classifier: Arc<dyn IntentResolver> = Arc::new(classifier);
        let (primary, secondary) = match config.backend {
            BackendKind::Rules => (rules, classifier),
            BackendKind::Classifier => (classifier, rules),
        };

        let store = FileAttachmentStore::new(&config.documents_dir, &config.images_dir)
            .with_probe_timeout(config.probe_timeout());

        let state = EngineState::new(primary, load_knowledge(config))?
            .with_secondary(secondary)
            .with_attachment_policy(AttachmentPolicy::new(config.attachments.clone())?)
            .with_attachment_store(Arc::new(store));

        log::info!(
            "Engine ready: primary {} ({}), {} answers",
            state.primary.name(),
            if state.primary.is_available() { "available" } else { "unavailable" },
            state.knowledge.len()
        );
        Ok(state)
    }

    /// The knowledge base.
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// The attachment store.
    pub fn store(&self) -> &Arc<dyn AttachmentStore> {
        &self.store
    }

    /// The attachment tables.
    pub fn attachment_policy(&self) -> &AttachmentPolicy {
        &self.attachments
    }

    /// Summaries of the primary and stand-in backends.
    pub fn backends(&self) -> Vec<ResolverSummary> {
        std::iter::once(&self.primary)
            .chain(self.secondary.as_ref())
            .map(|resolver| resolver.summary())
            .collect()
    }
}

fn load_knowledge(config: &EngineConfig) -> KnowledgeBase {
    let flat = match &config.knowledge_path {
        Some(path) => KnowledgeBase::from_file(path).unwrap_or_else(|e| {
            log::warn!("Cannot load knowledge table {}: {e}", path.display());
            KnowledgeBase::new()
        }),
        None => KnowledgeBase::builtin().unwrap_or_else(|e| {
            log::warn!("Built-in knowledge table is invalid: {e}");
            KnowledgeBase::new()
        }),
    };

    let Some(path) = &config.intents_path else {
        return flat;
    };
    match IntentsDocument::from_file(path) {
        Ok(document) => {
            let intents = KnowledgeBase::from_intents(&document);
            log::info!("Loaded {} intents from {}", intents.len(), path.display());
            flat.merge(intents)
        }
        Err(e) => {
            log::warn!("Cannot load intents {}: {e}", path.display());
            flat
        }
    }
}

/// Thread-safe FAQ engine.
pub struct FaqEngine {
    state: RwLock<Arc<EngineState>>,
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for FaqEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaqEngine")
            .field("state", &*self.state.read())
            .finish()
    }
}

impl FaqEngine {
    /// Create an engine. `seed` makes the choice among several answer texts
    /// reproducible.
    pub fn new(state: EngineState, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        FaqEngine {
            state: RwLock::new(Arc::new(state)),
            rng: Mutex::new(rng),
        }
    }

    /// Create an engine from a configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(EngineState::from_config(config)?, config.seed))
    }

    /// Current state.
    pub fn state(&self) -> Arc<EngineState> {
        Arc::clone(&self.state.read())
    }

    /// Replace the whole state. Requests already running keep the old one.
    pub fn reload(&self, state: EngineState) {
        *self.state.write() = Arc::new(state);
        log::info!("Engine state reloaded");
    }

    /// Resolve an utterance. Never fails.
    pub fn resolve(&self, utterance: &str) -> ResolutionResult {
        let state = self.state();
        let lowered = utterance.to_lowercase();

        let (intent, score, source) = match state.priority.detect(&lowered) {
            Some(matched) => (Some(matched.intent.to_string()), 1.0, matched.source),
            None => self.ask_backends(&state, utterance),
        };

        let response = intent.as_deref().and_then(|key| state.knowledge.get(key));
        let text = match (&intent, response) {
            (Some(_), Some(response)) => self.choose_text(response),
            (Some(key), None) => priority::default_text(key)
                .unwrap_or(NO_ANSWER_TEXT)
                .to_string(),
            (None, _) => state.fallback.respond(&lowered).to_string(),
        };

        let attachment =
            state
                .attachments
                .select(state.store.as_ref(), &lowered, intent.as_deref(), response);

        log::debug!(
            "Resolved via {:?}: intent={:?} score={score:.4} attachment={:?}",
            source,
            intent,
            attachment.as_ref().map(|a| a.file_id.as_str())
        );

        ResolutionResult {
            text,
            attachment,
            intent,
            score,
            source,
        }
    }

    fn ask_backends(
        &self,
        state: &EngineState,
        utterance: &str,
    ) -> (Option<String>, f64, ResolutionSource) {
        let mut resolver = &state.primary;
        let mut resolution = resolver.resolve(utterance);

        if resolution == Resolution::Unavailable {
            if let Some(secondary) = &state.secondary {
                log::debug!("{} unavailable, asking {}", resolver.name(), secondary.name());
                resolver = secondary;
                resolution = resolver.resolve(utterance);
            }
        }

        match resolution {
            Resolution::Matched(candidate) => {
                (Some(candidate.intent), candidate.score, resolver.source())
            }
            Resolution::NoMatch | Resolution::Unavailable => (None, 0.0, ResolutionSource::Fallback),
        }
    }

    fn choose_text(&self, response: &Response) -> String {
        let texts = response.texts();
        if texts.len() == 1 {
            return texts[0].clone();
        }
        let mut rng = self.rng.lock();
        texts
            .choose(&mut *rng)
            .cloned()
            .unwrap_or_else(|| response.primary_text().to_string())
    }
}
