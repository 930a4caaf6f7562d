// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Conversion of a [`ModelManifest`] into a typed [`IntermediateModel`].
//!
//! The loader resolves every kind string against its closed vocabulary and
//! reports failures with the offending layer position. It does not check
//! kind-specific field requirements: a pooling layer without a pool size is
//! still a valid IR value, and the backend that needs the field reports it.

use crate::{
    ActivationKind, IntermediateModel, Layer, LayerKind, ModelError, ModelManifest,
    OutputShape, PaddingKind, PoolSize, Strides,
};
use std::path::Path;

/// Loads a model manifest from disk into an [`IntermediateModel`].
///
/// # Example
/// ```no_run
/// use model_ir::ModelLoader;
/// use std::path::Path;
///
/// let model = ModelLoader::load(Path::new("./models/mnist.json")).unwrap();
/// println!("Loaded {} layers", model.num_layers());
/// ```
pub struct ModelLoader;

impl ModelLoader {
    /// Loads and converts a JSON manifest file.
    pub fn load(path: &Path) -> Result<IntermediateModel, ModelError> {
        let manifest = ModelManifest::from_file(path)?;
        let model = Self::from_manifest(&manifest)?;
        tracing::debug!("loaded {} from '{}'", model.summary(), path.display());
        Ok(model)
    }

    /// Parses and converts a JSON manifest string.
    pub fn from_json(json: &str) -> Result<IntermediateModel, ModelError> {
        Self::from_manifest(&ModelManifest::from_json(json)?)
    }

    /// Converts manifest entries into typed layers.
    pub fn from_manifest(manifest: &ModelManifest) -> Result<IntermediateModel, ModelError> {
        if manifest.layers.is_empty() {
            tracing::warn!("manifest '{}' contains no layers", manifest.name);
        }

        let mut layers = Vec::with_capacity(manifest.layers.len());
        for (position, ml) in manifest.layers.iter().enumerate() {
            let at = |e: ModelError| ModelError::InvalidLayer {
                position,
                detail: e.to_string(),
            };

            let kind = LayerKind::parse(&ml.layer_type).map_err(at)?;
            let activation = ml
                .activation
                .as_deref()
                .map(ActivationKind::parse)
                .transpose()
                .map_err(at)?;
            let padding = ml
                .padding
                .as_deref()
                .map(PaddingKind::parse)
                .transpose()
                .map_err(at)?;

            let output_shape = match (ml.output_width, ml.output_height) {
                (Some(width), Some(height)) => Some(OutputShape::new(width, height)),
                (None, None) => None,
                (w, h) => {
                    return Err(ModelError::InvalidLayer {
                        position,
                        detail: format!(
                            "output shape needs both width and height (got width {w:?}, height {h:?})"
                        ),
                    })
                }
            };

            layers.push(Layer {
                name: ml.name.clone(),
                kind,
                output_shape,
                activation,
                weights: ml.weights.clone(),
                bias: ml.bias.clone(),
                pool_size: ml.pool_size.map(|[width, height]| PoolSize { width, height }),
                strides: ml
                    .strides
                    .map(|[vertical, horizontal]| Strides { vertical, horizontal }),
                padding,
            });
        }

        Ok(IntermediateModel::new(manifest.name.clone(), layers))
    }
}
