//! Feed-forward classifier resolver.

use std::path::Path;

use crate::analysis::encoder::FeatureEncoder;
use crate::error::Result;
use crate::intent::model::ClassifierParameters;
use crate::intent::resolver::{IntentResolver, ResolverSummary};
use crate::intent::types::{Candidate, Resolution, ResolutionSource};

/// Default minimum probability, exclusive.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.75;

/// Check the confidence gate. The threshold itself is rejected.
pub fn is_confident(probability: f64, threshold: f64) -> bool {
    probability > threshold
}

#[derive(Debug, Clone)]
struct LoadedModel {
    encoder: FeatureEncoder,
    params: ClassifierParameters,
}

/// Encodes the utterance, runs the network and applies the confidence gate.
#[derive(Debug, Clone)]
pub struct ClassifierResolver {
    model: Option<LoadedModel>,
    threshold: f64,
}

impl ClassifierResolver {
    /// Create a resolver over loaded parameters.
    pub fn new(params: ClassifierParameters) -> Result<Self> {
        Ok(ClassifierResolver {
            model: Some(LoadedModel {
                encoder: FeatureEncoder::new()?,
                params,
            }),
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        })
    }

    /// A resolver whose model failed to load.
    pub fn unavailable() -> Self {
        ClassifierResolver {
            model: None,
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    /// Load the model export at `path`; on failure the resolver is disabled.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match ClassifierParameters::from_file(path).and_then(Self::new) {
            Ok(resolver) => {
                if let Some(model) = &resolver.model {
                    let net = model.params.net();
                    log::info!(
                        "Loaded classifier from {}: {} inputs, hidden {:?}, {} tags",
                        path.display(),
                        net.input_size(),
                        net.hidden_sizes(),
                        net.output_size()
                    );
                }
                resolver
            }
            Err(e) => {
                log::warn!("Classifier disabled, cannot load {}: {e}", path.display());
                Self::unavailable()
            }
        }
    }

    /// Set the confidence threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Confidence threshold in use.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The loaded parameters.
    pub fn parameters(&self) -> Option<&ClassifierParameters> {
        self.model.as_ref().map(|model| &model.params)
    }
}

impl IntentResolver for ClassifierResolver {
    fn resolve(&self, utterance: &str) -> Resolution {
        let Some(model) = &self.model else {
            return Resolution::Unavailable;
        };

        let features = match model.encoder.encode_text(utterance, model.params.vocabulary()) {
            Ok(features) => features,
            Err(e) => {
                log::warn!("Cannot encode utterance: {e}");
                return Resolution::NoMatch;
            }
        };

        match model.params.predict_tag(&features) {
            Some((tag, probability)) if is_confident(probability, self.threshold) => {
                Resolution::Matched(Candidate {
                    intent: tag.to_string(),
                    score: probability,
                })
            }
            Some((tag, probability)) => {
                log::debug!("Classifier not confident: {tag} at {probability:.4}");
                Resolution::NoMatch
            }
            None => Resolution::NoMatch,
        }
    }

    fn name(&self) -> &str {
        "classifier"
    }

    fn source(&self) -> ResolutionSource {
        ResolutionSource::Classifier
    }

    fn is_available(&self) -> bool {
        self.model.is_some()
    }

    fn summary(&self) -> ResolverSummary {
        let mut details = vec![("threshold".to_string(), self.threshold.to_string())];
        if let Some(model) = &self.model {
            let net = model.params.net();
            details.push(("vocabulary".to_string(), model.params.vocabulary().len().to_string()));
            details.push(("tags".to_string(), model.params.tags().len().to_string()));
            details.push(("hidden".to_string(), format!("{:?}", net.hidden_sizes())));
        }
        ResolverSummary {
            name: self.name().to_string(),
            available: self.is_available(),
            details,
        }
    }
}
