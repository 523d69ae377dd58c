//! The trained draft network and its on-disk weight artifact.
//!
//! The network is a stack of dense layers mapping a per-card count
//! vector (the collection so far) to a per-card rating. Architecture and
//! training live elsewhere; this module only evaluates stored weights.

use crate::error::{ModelError, Result};
use crate::vocab::Vocabulary;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
}

impl Activation {
    fn apply(self, x: f32) -> f32 {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.max(0.0),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }
}

/// One fully connected layer. `weights` is row-major, one row per output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    pub fn inputs(&self) -> usize {
        self.weights.first().map(|row| row.len()).unwrap_or(0)
    }

    pub fn outputs(&self) -> usize {
        self.bias.len()
    }

    fn validate(&self, position: usize) -> Result<()> {
        if self.weights.len() != self.bias.len() {
            return Err(ModelError::InvalidNetwork(format!(
                "layer {}: {} weight rows but {} biases",
                position,
                self.weights.len(),
                self.bias.len()
            )));
        }
        let inputs = self.inputs();
        if let Some(row) = self.weights.iter().position(|r| r.len() != inputs) {
            return Err(ModelError::InvalidNetwork(format!(
                "layer {}: row {} has {} columns, expected {}",
                position,
                row,
                self.weights[row].len(),
                inputs
            )));
        }
        Ok(())
    }

    fn forward(&self, input: &[f32]) -> Vec<f32> {
        self.weights
            .par_iter()
            .zip(self.bias.par_iter())
            .map(|(row, bias)| {
                let sum: f32 = row.iter().zip(input).map(|(w, x)| w * x).sum();
                self.activation.apply(sum + bias)
            })
            .collect()
    }
}

/// Serialized form of a trained model: `<SET>_<MODE>.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub cardnames: Vec<String>,
    pub layers: Vec<DenseLayer>,
}

impl ModelArtifact {
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ModelError::Malformed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec(self).map_err(|source| ModelError::Malformed {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

/// A loaded draft network bound to its card vocabulary.
#[derive(Debug, Clone)]
pub struct DraftNet {
    vocabulary: Vocabulary,
    layers: Vec<DenseLayer>,
}

impl DraftNet {
    /// Build a network from an artifact, checking that layer shapes chain
    /// from and back to the vocabulary size.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        let vocabulary = Vocabulary::new(artifact.cardnames)?;
        let layers = artifact.layers;

        if layers.is_empty() {
            return Err(ModelError::InvalidNetwork("no layers".to_string()));
        }
        for (i, layer) in layers.iter().enumerate() {
            layer.validate(i)?;
        }

        let mut width = vocabulary.len();
        for (i, layer) in layers.iter().enumerate() {
            if layer.inputs() != width {
                return Err(ModelError::InvalidNetwork(format!(
                    "layer {} expects {} inputs but receives {}",
                    i,
                    layer.inputs(),
                    width
                )));
            }
            width = layer.outputs();
        }
        if width != vocabulary.len() {
            return Err(ModelError::InvalidNetwork(format!(
                "network produces {} ratings for {} cards",
                width,
                vocabulary.len()
            )));
        }

        Ok(Self { vocabulary, layers })
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading draft network from {:?}", path);
        Self::from_artifact(ModelArtifact::from_file(path)?)
    }

    /// Reorder the network so its vocabulary follows `names`.
    ///
    /// `names` must contain exactly the network's card names; anything
    /// missing on either side is a `VocabularyMismatch`.
    pub fn aligned_to(self, names: &[String]) -> Result<Self> {
        let expected: HashSet<&str> = names.iter().map(String::as_str).collect();
        let missing: Vec<String> = names
            .iter()
            .filter(|n| self.vocabulary.position(n).is_none())
            .cloned()
            .collect();
        let extra: Vec<String> = self
            .vocabulary
            .names()
            .iter()
            .filter(|n| !expected.contains(n.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() || !extra.is_empty() || names.len() != self.vocabulary.len() {
            return Err(ModelError::VocabularyMismatch { missing, extra });
        }

        if names == self.vocabulary.names() {
            return Ok(self);
        }

        // perm[new] = old
        let perm: Vec<usize> = names
            .iter()
            .filter_map(|n| self.vocabulary.position(n))
            .collect();

        let mut layers = self.layers;
        if let Some(first) = layers.first_mut() {
            for row in first.weights.iter_mut() {
                *row = perm.iter().map(|&old| row[old]).collect();
            }
        }
        if let Some(last) = layers.last_mut() {
            last.weights = perm.iter().map(|&old| last.weights[old].clone()).collect();
            last.bias = perm.iter().map(|&old| last.bias[old]).collect();
        }

        Ok(Self {
            vocabulary: Vocabulary::new(names.to_vec())?,
            layers,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Evaluate the network on a count vector of vocabulary length
    pub fn forward(&self, counts: &[f32]) -> Vec<f32> {
        let mut activations = counts.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        activations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// out = W x + b over cards [A, B, C]
    fn linear_artifact() -> ModelArtifact {
        ModelArtifact {
            cardnames: names(&["A", "B", "C"]),
            layers: vec![DenseLayer {
                weights: vec![
                    vec![0.0, 0.5, 0.0],
                    vec![0.0, 0.0, 0.0],
                    vec![0.25, 0.0, 0.0],
                ],
                bias: vec![1.0, 2.0, 3.0],
                activation: Activation::Linear,
            }],
        }
    }

    #[test]
    fn test_forward_linear() {
        let net = DraftNet::from_artifact(linear_artifact()).unwrap();
        assert_eq!(net.forward(&[0.0, 0.0, 0.0]), vec![1.0, 2.0, 3.0]);
        assert_eq!(net.forward(&[1.0, 2.0, 0.0]), vec![2.0, 2.0, 3.25]);
    }

    #[test]
    fn test_forward_two_layers_with_relu() {
        let artifact = ModelArtifact {
            cardnames: names(&["A", "B"]),
            layers: vec![
                DenseLayer {
                    weights: vec![vec![1.0, -1.0]],
                    bias: vec![0.0],
                    activation: Activation::Relu,
                },
                DenseLayer {
                    weights: vec![vec![2.0], vec![-1.0]],
                    bias: vec![0.5, 0.5],
                    activation: Activation::Linear,
                },
            ],
        };
        let net = DraftNet::from_artifact(artifact).unwrap();
        // hidden = relu(1 - 0) = 1
        assert_eq!(net.forward(&[1.0, 0.0]), vec![2.5, -0.5]);
        // hidden = relu(0 - 1) = 0
        assert_eq!(net.forward(&[0.0, 1.0]), vec![0.5, 0.5]);
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let mut artifact = linear_artifact();
        artifact.layers[0].bias.pop();
        assert!(matches!(
            DraftNet::from_artifact(artifact),
            Err(ModelError::InvalidNetwork(_))
        ));

        let mut artifact = linear_artifact();
        artifact.cardnames.push("D".into());
        assert!(matches!(
            DraftNet::from_artifact(artifact),
            Err(ModelError::InvalidNetwork(_))
        ));
    }

    #[test]
    fn test_aligned_to_reorders_inputs_and_outputs() {
        let net = DraftNet::from_artifact(linear_artifact()).unwrap();
        let aligned = net.aligned_to(&names(&["C", "A", "B"])).unwrap();

        assert_eq!(aligned.vocabulary().names(), names(&["C", "A", "B"]).as_slice());
        // Collection [B, B]: A = 1 + 0.5*2 = 2, B = 2, C = 3
        assert_eq!(aligned.forward(&[0.0, 0.0, 2.0]), vec![3.0, 2.0, 2.0]);
        // Collection [A]: C = 3 + 0.25
        assert_eq!(aligned.forward(&[0.0, 1.0, 0.0]), vec![3.25, 1.0, 2.0]);
    }

    #[test]
    fn test_aligned_to_reports_vocabulary_mismatch() {
        let net = DraftNet::from_artifact(linear_artifact()).unwrap();
        match net.aligned_to(&names(&["A", "B", "Z"])) {
            Err(ModelError::VocabularyMismatch { missing, extra }) => {
                assert_eq!(missing, vec!["Z"]);
                assert_eq!(extra, vec!["C"]);
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_artifact_file_round_trip() {
        let file = NamedTempFile::new().unwrap();
        linear_artifact().to_file(file.path()).unwrap();
        let net = DraftNet::load(file.path()).unwrap();
        assert_eq!(net.vocabulary().len(), 3);
    }

    #[test]
    fn test_malformed_artifact() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"{\"cardnames\": [").unwrap();
        assert!(matches!(
            DraftNet::load(file.path()),
            Err(ModelError::Malformed { .. })
        ));
    }
}
