// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! JSON model manifest parsing.
//!
//! The manifest is the serialized form of an [`IntermediateModel`]. Kind
//! fields are kept as strings here and converted into the closed
//! vocabularies by [`crate::ModelLoader`], so that an unknown kind can be
//! reported together with the position of the offending layer.
//!
//! # Format
//! ```json
//! {
//!   "name": "mnist-mlp",
//!   "layers": [
//!     {
//!       "name": "fc1",
//!       "layer_type": "dense",
//!       "output_width": 2,
//!       "output_height": 1,
//!       "activation": "relu",
//!       "weights": [[0.5, -0.5], [0.25, 1.0]],
//!       "bias": [0.1, 0.2]
//!     },
//!     {
//!       "layer_type": "maxpooling2d",
//!       "output_width": 1,
//!       "output_height": 1,
//!       "pool_size": [2, 2],
//!       "strides": [1, 1],
//!       "padding": "valid"
//!     }
//!   ]
//! }
//! ```
//!
//! `pool_size` is `[width, height]` and `strides` is `[vertical, horizontal]`.

use crate::{IntermediateModel, ModelError};
use std::path::Path;

/// Top-level model manifest.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ModelManifest {
    /// Human-readable model name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Layer entries in execution order.
    pub layers: Vec<ManifestLayer>,
}

fn default_name() -> String {
    "model".to_string()
}

/// A single layer entry in the manifest.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ManifestLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Layer kind string (e.g. `"dense"`, `"maxpooling2d"`).
    pub layer_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_width: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_height: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<Vec<f32>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<[usize; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strides: Option<[usize; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
}

impl ModelManifest {
    /// Loads a manifest from a JSON file path.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ModelError::ManifestReadError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&content)
    }

    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let manifest: Self = serde_json::from_str(json)?;
        Ok(manifest)
    }

    /// Serializes the manifest to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the manifest form of a typed model.
    pub fn from_model(model: &IntermediateModel) -> Self {
        let layers = model
            .iter_layers()
            .map(|l| ManifestLayer {
                name: l.name.clone(),
                layer_type: l.kind.as_str().to_string(),
                output_width: l.output_shape.map(|s| s.width),
                output_height: l.output_shape.map(|s| s.height),
                activation: l.activation.map(|a| a.as_str().to_string()),
                weights: l.weights.clone(),
                bias: l.bias.clone(),
                pool_size: l.pool_size.map(|p| [p.width, p.height]),
                strides: l.strides.map(|s| [s.vertical, s.horizontal]),
                padding: l.padding.map(|p| p.as_str().to_string()),
            })
            .collect();
        Self {
            name: model.name.clone(),
            layers,
        }
    }
}
