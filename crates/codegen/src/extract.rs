// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Parameter extraction: one pass over the IR producing the flat, per-layer
//! arrays the generated code is driven by.
//!
//! Every per-layer sequence in [`ExtractedParameters`] has exactly one entry
//! per layer, in IR order, so consumers may index them positionally without
//! re-checking layer kinds.
//!
//! # Flattening convention
//! Dense weight matrices are flattened input-unit major: the value
//! connecting input `i` to output `j` lands at `offset + i * cols + j`.
//! Layers that carry no block (every non-dense layer for weights, and dense
//! layers without bias for biases) record `None`, rendered as
//! [`crate::codec::NOT_APPLICABLE`].

use crate::codec::LayerCode;
use crate::CodegenError;
use model_ir::{ActivationKind, IntermediateModel, Layer, LayerKind};

/// A contiguous value sequence plus the start offset of each layer's block.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct FlattenedParams {
    values: Vec<f32>,
    offsets: Vec<Option<usize>>,
}

impl FlattenedParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer's block and records its start offset.
    pub fn push_block(&mut self, block: impl IntoIterator<Item = f32>) {
        self.offsets.push(Some(self.values.len()));
        self.values.extend(block);
    }

    /// Records a layer that contributes no block.
    pub fn push_absent(&mut self) {
        self.offsets.push(None);
    }

    /// All values, concatenated in layer order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Per-layer start offsets (`None` for layers without a block).
    pub fn offsets(&self) -> &[Option<usize>] {
        &self.offsets
    }

    /// Total number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of layers recorded so far.
    pub fn num_layers(&self) -> usize {
        self.offsets.len()
    }

    /// Returns the block belonging to `layer`, or `None` if the layer has
    /// none. A block ends where the next recorded block starts.
    pub fn block(&self, layer: usize) -> Option<&[f32]> {
        let start = (*self.offsets.get(layer)?)?;
        let end = self.offsets[layer + 1..]
            .iter()
            .flatten()
            .next()
            .copied()
            .unwrap_or(self.values.len());
        Some(&self.values[start..end])
    }
}

/// Everything the marker table is built from.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExtractedParameters {
    pub number_of_layers: usize,
    /// Layer kind code per layer.
    pub layer_types: Vec<i32>,
    pub output_widths: Vec<usize>,
    pub output_heights: Vec<usize>,
    /// Activation code per layer; linear for layers without an activation.
    pub activations: Vec<i32>,
    /// Flattened dense weight matrices.
    pub weights: FlattenedParams,
    /// Flattened dense bias vectors.
    pub bias: FlattenedParams,
    pub use_bias: Vec<bool>,
    /// Pool window width per layer (pooling layers only).
    pub pool_widths: Vec<Option<usize>>,
    pub pool_heights: Vec<Option<usize>>,
    /// Strides per layer (pooling and convolution layers only).
    pub vertical_strides: Vec<Option<usize>>,
    pub horizontal_strides: Vec<Option<usize>>,
    /// Padding code per layer (pooling and convolution layers only).
    pub padding: Vec<Option<i32>>,
}

impl ExtractedParameters {
    fn with_capacity(n: usize) -> Self {
        Self {
            number_of_layers: n,
            layer_types: Vec::with_capacity(n),
            output_widths: Vec::with_capacity(n),
            output_heights: Vec::with_capacity(n),
            activations: Vec::with_capacity(n),
            weights: FlattenedParams::new(),
            bias: FlattenedParams::new(),
            use_bias: Vec::with_capacity(n),
            pool_widths: Vec::with_capacity(n),
            pool_heights: Vec::with_capacity(n),
            vertical_strides: Vec::with_capacity(n),
            horizontal_strides: Vec::with_capacity(n),
            padding: Vec::with_capacity(n),
        }
    }

    /// Lengths of every per-layer sequence, labelled.
    pub fn per_layer_lengths(&self) -> [(&'static str, usize); 13] {
        [
            ("layer_types", self.layer_types.len()),
            ("output_widths", self.output_widths.len()),
            ("output_heights", self.output_heights.len()),
            ("activations", self.activations.len()),
            ("weight_offsets", self.weights.num_layers()),
            ("bias_offsets", self.bias.num_layers()),
            ("use_bias", self.use_bias.len()),
            ("pool_widths", self.pool_widths.len()),
            ("pool_heights", self.pool_heights.len()),
            ("vertical_strides", self.vertical_strides.len()),
            ("horizontal_strides", self.horizontal_strides.len()),
            ("padding", self.padding.len()),
            ("layers", self.number_of_layers),
        ]
    }
}

/// Extracts all per-layer parameters from `model` in a single pass.
///
/// # Errors
/// - [`CodegenError::EmptyModel`] if the model has no layers.
/// - [`CodegenError::MissingField`] if a layer lacks a field its kind
///   requires (see the table in the crate docs).
/// - [`CodegenError::InvalidField`] for empty or ragged weight matrices,
///   empty bias vectors and non-finite values.
pub fn extract(model: &IntermediateModel) -> Result<ExtractedParameters, CodegenError> {
    if model.is_empty() {
        return Err(CodegenError::EmptyModel(model.name.clone()));
    }

    let mut params = ExtractedParameters::with_capacity(model.num_layers());

    for (position, layer) in model.iter_layers().enumerate() {
        let shape = require(layer.output_shape, position, layer, "output_shape")?;
        params.layer_types.push(layer.kind.code());
        params.output_widths.push(shape.width);
        params.output_heights.push(shape.height);

        let activation = match layer.kind {
            LayerKind::Dense | LayerKind::Activation => {
                require(layer.activation, position, layer, "activation")?
            }
            _ => layer.activation.unwrap_or(ActivationKind::Linear),
        };
        params.activations.push(activation.code());

        if layer.kind == LayerKind::Dense {
            let weights = require(layer.weights.as_ref(), position, layer, "weights")?;
            let cols = check_matrix(weights, position)?;
            params
                .weights
                .push_block(weights.iter().flat_map(|row| row.iter().copied()));

            match &layer.bias {
                Some(bias) => {
                    check_values(bias, position, "bias")?;
                    if bias.len() != cols {
                        tracing::warn!(
                            "layer {position}: bias length {} differs from {cols} output units",
                            bias.len(),
                        );
                    }
                    params.bias.push_block(bias.iter().copied());
                    params.use_bias.push(true);
                }
                None => {
                    params.bias.push_absent();
                    params.use_bias.push(false);
                }
            }
        } else {
            if layer.weights.is_some() || layer.bias.is_some() {
                tracing::debug!(
                    "layer {position}: ignoring parameters on {} layer",
                    layer.kind
                );
            }
            params.weights.push_absent();
            params.bias.push_absent();
            params.use_bias.push(false);
        }

        if layer.kind.is_pooling() {
            let pool = require(layer.pool_size, position, layer, "pool_size")?;
            params.pool_widths.push(Some(pool.width));
            params.pool_heights.push(Some(pool.height));
        } else {
            params.pool_widths.push(None);
            params.pool_heights.push(None);
        }

        if layer.kind.is_spatial() {
            let strides = require(layer.strides, position, layer, "strides")?;
            let padding = require(layer.padding, position, layer, "padding")?;
            params.vertical_strides.push(Some(strides.vertical));
            params.horizontal_strides.push(Some(strides.horizontal));
            params.padding.push(Some(padding.code()));
        } else {
            params.vertical_strides.push(None);
            params.horizontal_strides.push(None);
            params.padding.push(None);
        }

        tracing::debug!(
            "layer {position}: {} (code {}) -> {shape}",
            layer.kind,
            layer.kind.code()
        );
    }

    tracing::debug!(
        "extracted {} layers, {} weights, {} biases",
        params.number_of_layers,
        params.weights.len(),
        params.bias.len(),
    );
    Ok(params)
}

fn require<T>(
    value: Option<T>,
    position: usize,
    layer: &Layer,
    field: &'static str,
) -> Result<T, CodegenError> {
    value.ok_or_else(|| CodegenError::MissingField {
        position,
        kind: layer.kind.to_string(),
        field,
    })
}

/// Checks that a weight matrix is non-empty, rectangular and finite.
/// Returns the column (output unit) count.
fn check_matrix(matrix: &[Vec<f32>], position: usize) -> Result<usize, CodegenError> {
    let cols = match matrix.first() {
        Some(row) if !row.is_empty() => row.len(),
        _ => {
            return Err(CodegenError::InvalidField {
                position,
                field: "weights",
                detail: "weight matrix is empty".into(),
            })
        }
    };
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != cols {
            return Err(CodegenError::InvalidField {
                position,
                field: "weights",
                detail: format!("row {i} has {} columns, expected {cols}", row.len()),
            });
        }
        check_values(row, position, "weights")?;
    }
    Ok(cols)
}

fn check_values(values: &[f32], position: usize, field: &'static str) -> Result<(), CodegenError> {
    if values.is_empty() {
        return Err(CodegenError::InvalidField {
            position,
            field,
            detail: "vector is empty".into(),
        });
    }
    if let Some(v) = values.iter().find(|v| !v.is_finite()) {
        return Err(CodegenError::InvalidField {
            position,
            field,
            detail: format!("non-finite value {v}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_ir::{OutputShape, PaddingKind, PoolOp, PoolSize, SpatialRank, Strides};

    fn cnn() -> IntermediateModel {
        IntermediateModel::new(
            "cnn",
            vec![
                Layer::convolution(
                    SpatialRank::Two,
                    OutputShape::new(8, 8),
                    Strides { vertical: 1, horizontal: 1 },
                    PaddingKind::Same,
                ),
                Layer::pooling(
                    SpatialRank::Two,
                    PoolOp::Max,
                    OutputShape::new(4, 4),
                    PoolSize { width: 2, height: 2 },
                    Strides { vertical: 2, horizontal: 2 },
                    PaddingKind::Valid,
                ),
                Layer::flatten(16),
                Layer::dense(ActivationKind::Relu, vec![vec![0.5, -0.5]; 16], Some(vec![0.1, 0.2])),
                Layer::dropout(OutputShape::vector(2)),
                Layer::dense(ActivationKind::Softmax, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], None),
            ],
        )
    }

    #[test]
    fn test_per_layer_sequences_aligned() {
        let p = extract(&cnn()).unwrap();
        assert_eq!(p.number_of_layers, 6);
        for (name, len) in p.per_layer_lengths() {
            assert_eq!(len, 6, "{name}");
        }
    }

    #[test]
    fn test_codes_in_order() {
        let p = extract(&cnn()).unwrap();
        assert_eq!(p.layer_types, vec![10, 4, 2, 1, 0, 1]);
        assert_eq!(p.activations, vec![0, 0, 0, 2, 0, 4]);
        assert_eq!(p.output_widths, vec![8, 4, 16, 2, 2, 3]);
        assert_eq!(p.output_heights, vec![8, 4, 1, 1, 1, 1]);
    }

    #[test]
    fn test_weight_offsets_and_sentinels() {
        let p = extract(&cnn()).unwrap();
        assert_eq!(p.weights.len(), 32 + 6);
        assert_eq!(
            p.weights.offsets(),
            &[None, None, None, Some(0), None, Some(32)]
        );
        assert_eq!(p.bias.offsets(), &[None, None, None, Some(0), None, None]);
        assert_eq!(p.use_bias, vec![false, false, false, true, false, false]);
        assert_eq!(p.bias.values(), &[0.1, 0.2]);
    }

    #[test]
    fn test_weights_row_major_input_to_output() {
        let p = extract(&cnn()).unwrap();
        assert_eq!(p.weights.block(5).unwrap(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_weight_roundtrip() {
        let model = cnn();
        let p = extract(&model).unwrap();
        for (i, layer) in model.iter_layers().enumerate() {
            match &layer.weights {
                Some(matrix) => {
                    let cols = matrix[0].len();
                    let rebuilt: Vec<Vec<f32>> = p
                        .weights
                        .block(i)
                        .unwrap()
                        .chunks(cols)
                        .map(<[f32]>::to_vec)
                        .collect();
                    assert_eq!(&rebuilt, matrix);
                }
                None => assert!(p.weights.block(i).is_none()),
            }
        }
    }

    #[test]
    fn test_spatial_fields() {
        let p = extract(&cnn()).unwrap();
        assert_eq!(p.pool_widths, vec![None, Some(2), None, None, None, None]);
        assert_eq!(p.pool_heights, vec![None, Some(2), None, None, None, None]);
        assert_eq!(p.vertical_strides, vec![Some(1), Some(2), None, None, None, None]);
        assert_eq!(p.horizontal_strides, vec![Some(1), Some(2), None, None, None, None]);
        assert_eq!(p.padding, vec![Some(1), Some(0), None, None, None, None]);
    }

    #[test]
    fn test_empty_model() {
        let model = IntermediateModel::new("empty", vec![]);
        assert!(matches!(extract(&model), Err(CodegenError::EmptyModel(_))));
    }

    #[test]
    fn test_missing_pool_size_reports_position() {
        let mut pool = Layer::pooling(
            SpatialRank::One,
            PoolOp::Average,
            OutputShape::vector(4),
            PoolSize { width: 2, height: 1 },
            Strides { vertical: 1, horizontal: 2 },
            PaddingKind::Valid,
        );
        pool.pool_size = None;
        let model = IntermediateModel::new("m", vec![Layer::flatten(8), pool]);
        match extract(&model) {
            Err(CodegenError::MissingField { position, kind, field }) => {
                assert_eq!(position, 1);
                assert_eq!(kind, "avgpooling1d");
                assert_eq!(field, "pool_size");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_fields() {
        let no_shape = Layer::new(LayerKind::Flatten);
        let no_act = Layer {
            activation: None,
            ..Layer::dense(ActivationKind::Relu, vec![vec![1.0]], None)
        };
        let no_weights = Layer {
            weights: None,
            ..Layer::dense(ActivationKind::Relu, vec![vec![1.0]], None)
        };
        let conv_no_padding = Layer {
            padding: None,
            ..Layer::convolution(
                SpatialRank::One,
                OutputShape::vector(3),
                Strides { vertical: 1, horizontal: 1 },
                PaddingKind::Valid,
            )
        };
        for (layer, field) in [
            (no_shape, "output_shape"),
            (no_act, "activation"),
            (no_weights, "weights"),
            (conv_no_padding, "padding"),
        ] {
            let model = IntermediateModel::new("m", vec![layer]);
            match extract(&model) {
                Err(CodegenError::MissingField { field: f, position: 0, .. }) => assert_eq!(f, field),
                other => panic!("expected missing {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_ragged_and_non_finite_weights() {
        let ragged = Layer::dense(ActivationKind::Linear, vec![vec![1.0, 2.0], vec![3.0]], None);
        let model = IntermediateModel::new("m", vec![ragged]);
        assert!(matches!(
            extract(&model),
            Err(CodegenError::InvalidField { field: "weights", .. })
        ));

        let nan = Layer::dense(ActivationKind::Linear, vec![vec![f32::NAN]], None);
        let model = IntermediateModel::new("m", vec![nan]);
        assert!(matches!(
            extract(&model),
            Err(CodegenError::InvalidField { field: "weights", .. })
        ));

        let empty_bias = Layer::dense(ActivationKind::Linear, vec![vec![1.0]], Some(vec![]));
        let model = IntermediateModel::new("m", vec![empty_bias]);
        assert!(matches!(
            extract(&model),
            Err(CodegenError::InvalidField { field: "bias", .. })
        ));
    }

    #[test]
    fn test_activation_layer_keeps_code() {
        let model = IntermediateModel::new(
            "m",
            vec![Layer::activation(ActivationKind::Tanh, OutputShape::vector(5))],
        );
        let p = extract(&model).unwrap();
        assert_eq!(p.layer_types, vec![12]);
        assert_eq!(p.activations, vec![3]);
        assert!(p.weights.is_empty());
    }

    #[test]
    fn test_flattened_block_lookup() {
        let mut f = FlattenedParams::new();
        f.push_absent();
        f.push_block([1.0, 2.0]);
        f.push_absent();
        f.push_block([3.0]);
        assert_eq!(f.block(0), None);
        assert_eq!(f.block(1), Some(&[1.0, 2.0][..]));
        assert_eq!(f.block(3), Some(&[3.0][..]));
        assert_eq!(f.block(4), None);
        assert_eq!(f.num_layers(), 4);
    }
}
