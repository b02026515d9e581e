//! Feed-forward classifier parameters and inference.
//!
//! Parameters come from a JSON export of the training job's state:
//!
//! ```json
//! {
//!   "all_words": ["hour", "librari", "open"],
//!   "tags": ["library_opening", "greeting_hi"],
//!   "input_size": 3, "hidden_size": 4, "output_size": 2,
//!   "model_state": {
//!     "l1.weight": [[...], ...], "l1.bias": [...],
//!     "l2.weight": [[...], ...], "l2.bias": [...]
//!   }
//! }
//! ```
//!
//! Layers are taken in key order and grouped by the name before `.weight` /
//! `.bias`. Weights are `[out][in]`. ReLU is applied between layers, never
//! after the last one.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::analysis::vocabulary::{FeatureVector, Vocabulary};
use crate::error::{FaqError, Result};

/// One fully connected layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    /// `weights[o][i]` connects input `i` to output `o`.
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
}

impl DenseLayer {
    /// Create a layer, checking that every row has the same width and that
    /// there is one bias per row.
    pub fn new(weights: Vec<Vec<f64>>, biases: Vec<f64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(FaqError::model("layer has no outputs"));
        }
        if weights.len() != biases.len() {
            return Err(FaqError::model(format!(
                "layer has {} weight rows but {} biases",
                weights.len(),
                biases.len()
            )));
        }
        let inputs = weights[0].len();
        if inputs == 0 || weights.iter().any(|row| row.len() != inputs) {
            return Err(FaqError::model("layer weight rows are ragged or empty"));
        }
        Ok(DenseLayer { weights, biases })
    }

    /// Input width.
    pub fn inputs(&self) -> usize {
        self.weights[0].len()
    }

    /// Output width.
    pub fn outputs(&self) -> usize {
        self.weights.len()
    }

    /// `W·x + b`.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, bias)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + bias)
            .collect()
    }
}

/// A chain of dense layers with ReLU between them.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedForwardNet {
    layers: Vec<DenseLayer>,
}

impl FeedForwardNet {
    /// Create a network, checking that consecutive layer sizes line up.
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(FaqError::model("network has no layers"));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].outputs() != pair[1].inputs() {
                return Err(FaqError::model(format!(
                    "layer {} emits {} values but layer {} takes {}",
                    i + 1,
                    pair[0].outputs(),
                    i + 2,
                    pair[1].inputs()
                )));
            }
        }
        Ok(FeedForwardNet { layers })
    }

    /// Input width of the first layer.
    pub fn input_size(&self) -> usize {
        self.layers[0].inputs()
    }

    /// Output width of the last layer.
    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].outputs()
    }

    /// Widths of the layers between input and output.
    pub fn hidden_sizes(&self) -> Vec<usize> {
        let last = self.layers.len() - 1;
        self.layers[..last].iter().map(DenseLayer::outputs).collect()
    }

    /// Raw output scores.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let last = self.layers.len() - 1;
        let mut activations = input.to_vec();
        for (i, layer) in self.layers.iter().enumerate() {
            activations = layer.forward(&activations);
            if i < last {
                activations.iter_mut().for_each(|v| *v = v.max(0.0));
            }
        }
        activations
    }
}

/// Softmax with the maximum subtracted first.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Tensor {
    Matrix(Vec<Vec<f64>>),
    Vector(Vec<f64>),
}

#[derive(Debug, Deserialize)]
struct ClassifierArtifact {
    all_words: Vec<String>,
    tags: Vec<String>,
    input_size: usize,
    #[serde(default)]
    hidden_size: Option<usize>,
    output_size: usize,
    model_state: IndexMap<String, Tensor>,
}

/// Everything the classifier needs at inference time.
#[derive(Debug, Clone)]
pub struct ClassifierParameters {
    vocabulary: Vocabulary,
    tags: Vec<String>,
    net: FeedForwardNet,
}

impl ClassifierParameters {
    /// Assemble parameters, checking that the vocabulary feeds the first
    /// layer and the last layer emits one score per tag.
    pub fn new(vocabulary: Vocabulary, tags: Vec<String>, net: FeedForwardNet) -> Result<Self> {
        if net.input_size() != vocabulary.len() {
            return Err(FaqError::model(format!(
                "network takes {} inputs but the vocabulary has {} words",
                net.input_size(),
                vocabulary.len()
            )));
        }
        if net.output_size() != tags.len() {
            return Err(FaqError::model(format!(
                "network emits {} scores but there are {} tags",
                net.output_size(),
                tags.len()
            )));
        }
        Ok(ClassifierParameters {
            vocabulary,
            tags,
            net,
        })
    }

    /// Parse the JSON export of a trained model.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let artifact: ClassifierArtifact = serde_json::from_str(content)
            .map_err(|e| FaqError::artifact(format!("malformed classifier artifact: {e}")))?;

        let layers = Self::layers_from_state(artifact.model_state)?;
        let net = FeedForwardNet::new(layers)?;

        if net.input_size() != artifact.input_size || net.output_size() != artifact.output_size {
            return Err(FaqError::model(format!(
                "declared sizes {}→{} do not match weights {}→{}",
                artifact.input_size,
                artifact.output_size,
                net.input_size(),
                net.output_size()
            )));
        }
        if let Some(hidden) = artifact.hidden_size {
            if net.hidden_sizes().iter().any(|&size| size != hidden) {
                return Err(FaqError::model(format!(
                    "declared hidden size {hidden} does not match weights {:?}",
                    net.hidden_sizes()
                )));
            }
        }

        let vocabulary = Vocabulary::from_artifact(artifact.all_words)?;
        Self::new(vocabulary, artifact.tags, net)
    }

    /// Load the JSON export from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    fn layers_from_state(state: IndexMap<String, Tensor>) -> Result<Vec<DenseLayer>> {
        let mut grouped: IndexMap<String, (Option<Vec<Vec<f64>>>, Option<Vec<f64>>)> =
            IndexMap::new();

        for (key, tensor) in state {
            let (layer, param) = key
                .rsplit_once('.')
                .ok_or_else(|| FaqError::model(format!("unexpected state key '{key}'")))?;
            let slot = grouped.entry(layer.to_string()).or_default();
            match (param, tensor) {
                ("weight", Tensor::Matrix(weights)) => slot.0 = Some(weights),
                ("bias", Tensor::Vector(biases)) => slot.1 = Some(biases),
                // An empty list parses as a matrix.
                ("bias", Tensor::Matrix(rows)) if rows.is_empty() => slot.1 = Some(Vec::new()),
                _ => return Err(FaqError::model(format!("unexpected tensor shape for '{key}'"))),
            }
        }

        grouped
            .into_iter()
            .map(|(name, params)| match params {
                (Some(weights), Some(biases)) => DenseLayer::new(weights, biases)
                    .map_err(|e| FaqError::model(format!("layer '{name}': {e}"))),
                _ => Err(FaqError::model(format!("layer '{name}' needs both weight and bias"))),
            })
            .collect()
    }

    /// Vocabulary the network was trained on.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Tags in output order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The network.
    pub fn net(&self) -> &FeedForwardNet {
        &self.net
    }

    /// Arg-max output index and its softmax probability.
    ///
    /// Returns `None` when the feature vector does not match the vocabulary.
    pub fn predict(&self, features: &FeatureVector) -> Option<(usize, f64)> {
        if features.len() != self.vocabulary.len() {
            return None;
        }
        let input: Vec<f64> = features.values().iter().map(|&v| f64::from(v)).collect();
        let probabilities = softmax(&self.net.forward(&input));

        let mut best: Option<(usize, f64)> = None;
        for (index, &p) in probabilities.iter().enumerate() {
            if best.is_none_or(|(_, top)| p > top) {
                best = Some((index, p));
            }
        }
        best.filter(|(_, p)| p.is_finite())
    }

    /// Arg-max tag and its probability.
    pub fn predict_tag(&self, features: &FeatureVector) -> Option<(&str, f64)> {
        self.predict(features)
            .map(|(index, p)| (self.tags[index].as_str(), p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = r#"{
        "all_words": ["hour", "librari", "open"],
        "tags": ["library_opening", "greeting_hi"],
        "input_size": 3,
        "hidden_size": 2,
        "output_size": 2,
        "model_state": {
            "l1.weight": [[1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]],
            "l1.bias": [0.0, 1.0],
            "l2.weight": [[3.0, 0.0], [0.0, 3.0]],
            "l2.bias": [0.0, 0.0]
        }
    }"#;

    #[test]
    fn test_softmax_is_stable() {
        let p = softmax(&[1000.0, 1000.0]);
        assert!((p[0] - 0.5).abs() < 1e-12);

        let p = softmax(&[0.0, -1000.0]);
        assert!((p[0] - 1.0).abs() < 1e-12);
        assert!(p.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_relu_between_layers_only() {
        let net = FeedForwardNet::new(vec![
            DenseLayer::new(vec![vec![1.0], vec![-1.0]], vec![0.0, 0.0]).unwrap(),
            DenseLayer::new(vec![vec![1.0, 1.0]], vec![-5.0]).unwrap(),
        ])
        .unwrap();

        // Hidden [2, -2] is clipped to [2, 0]; the output keeps its sign.
        assert_eq!(net.forward(&[2.0]), vec![-3.0]);
        assert_eq!(net.hidden_sizes(), vec![2]);
    }

    #[test]
    fn test_parse_and_predict() {
        let params = ClassifierParameters::from_json_str(TINY).unwrap();
        assert_eq!(params.vocabulary().len(), 3);
        assert_eq!(params.net().output_size(), 2);

        let features = FeatureVector::from(vec![1.0, 1.0, 1.0]);
        let (tag, p) = params.predict_tag(&features).unwrap();
        assert_eq!(tag, "library_opening");
        // hidden [3, 0] → scores [9, 0]
        assert!((p - 1.0 / (1.0 + (-9.0f64).exp())).abs() < 1e-9);

        let (tag, _) = params.predict_tag(&FeatureVector::zeros(3)).unwrap();
        assert_eq!(tag, "greeting_hi");

        assert!(params.predict(&FeatureVector::zeros(2)).is_none());
    }

    #[test]
    fn test_inconsistent_shapes_rejected() {
        let wrong_input = TINY.replace(r#""input_size": 3"#, r#""input_size": 4"#);
        assert!(ClassifierParameters::from_json_str(&wrong_input).is_err());

        let wrong_tags = TINY.replace(r#"["library_opening", "greeting_hi"]"#, r#"["only"]"#);
        assert!(ClassifierParameters::from_json_str(&wrong_tags).is_err());

        let wrong_hidden = TINY.replace(r#""hidden_size": 2"#, r#""hidden_size": 8"#);
        assert!(ClassifierParameters::from_json_str(&wrong_hidden).is_err());

        let missing_bias = TINY.replace(r#""l2.bias": [0.0, 0.0]"#, r#""l3.bias": [0.0, 0.0]"#);
        assert!(ClassifierParameters::from_json_str(&missing_bias).is_err());

        assert!(ClassifierParameters::from_json_str("{}").is_err());
    }

    #[test]
    fn test_layers_must_chain() {
        let a = DenseLayer::new(vec![vec![1.0, 1.0]], vec![0.0]).unwrap();
        let b = DenseLayer::new(vec![vec![1.0, 1.0]], vec![0.0]).unwrap();
        assert!(FeedForwardNet::new(vec![a, b]).is_err());
        assert!(DenseLayer::new(vec![vec![1.0], vec![1.0, 2.0]], vec![0.0, 0.0]).is_err());
        assert!(DenseLayer::new(vec![vec![1.0]], vec![]).is_err());
    }
}
