//! Intent resolver trait definition.

use serde::Serialize;

use crate::intent::types::{Resolution, ResolutionSource};

/// What a resolver loaded, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolverSummary {
    /// Resolver name.
    pub name: String,
    /// Whether it can answer.
    pub available: bool,
    /// Backend-specific facts, e.g. rule count or network sizes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<(String, String)>,
}

/// A backend that maps an utterance to an intent.
///
/// Implementations never fail per request: artifacts that could not be
/// loaded make the resolver report [`Resolution::Unavailable`] on every call.
pub trait IntentResolver: Send + Sync {
    /// Resolve an utterance to at most one intent.
    fn resolve(&self, utterance: &str) -> Resolution;

    /// Name of this resolver for logging.
    fn name(&self) -> &str;

    /// Source recorded on results this resolver produces.
    fn source(&self) -> ResolutionSource;

    /// Whether the resolver loaded and can answer.
    fn is_available(&self) -> bool;

    /// Describe what was loaded.
    fn summary(&self) -> ResolverSummary {
        ResolverSummary {
            name: self.name().to_string(),
            available: self.is_available(),
            details: Vec::new(),
        }
    }
}
