// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Layer definitions for the network IR.
//!
//! A [`Layer`] is a tagged variant over [`LayerKind`]: which of its optional
//! fields must be present depends on the kind. The IR does not enforce those
//! requirements itself; consumers check the fields they need and report the
//! offending layer position.
//!
//! The three vocabularies ([`LayerKind`], [`ActivationKind`],
//! [`PaddingKind`]) are closed. Parsing is case-insensitive and ignores `_`
//! and `-`, so both `max_pooling2d` and Keras' `MaxPooling2D` are accepted.

use crate::ModelError;
use std::fmt;

/// Number of spatial dimensions of a pooling or convolution layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialRank {
    One,
    Two,
    Three,
}

impl SpatialRank {
    pub const ALL: [SpatialRank; 3] = [Self::One, Self::Two, Self::Three];

    fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "1d" => Some(Self::One),
            "2d" => Some(Self::Two),
            "3d" => Some(Self::Three),
            _ => None,
        }
    }

    /// Returns the `1d`/`2d`/`3d` suffix used in kind names.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::One => "1d",
            Self::Two => "2d",
            Self::Three => "3d",
        }
    }
}

/// Reduction applied by a pooling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolOp {
    Max,
    Average,
}

/// The kind of computation a layer performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Fully connected layer with a weight matrix and optional bias.
    Dense,
    /// Reshape to a flat vector.
    Flatten,
    /// Max or average pooling over 1, 2 or 3 spatial dimensions.
    Pooling { rank: SpatialRank, op: PoolOp },
    /// Convolution over 1, 2 or 3 spatial dimensions.
    Convolution { rank: SpatialRank },
    /// Dropout (identity at inference time).
    Dropout,
    /// Standalone activation function.
    Activation,
}

impl LayerKind {
    /// Every layer kind, in code order of the GCC backend.
    pub const ALL: [LayerKind; 13] = [
        Self::Dropout,
        Self::Dense,
        Self::Flatten,
        Self::Pooling { rank: SpatialRank::One, op: PoolOp::Max },
        Self::Pooling { rank: SpatialRank::Two, op: PoolOp::Max },
        Self::Pooling { rank: SpatialRank::Three, op: PoolOp::Max },
        Self::Pooling { rank: SpatialRank::One, op: PoolOp::Average },
        Self::Pooling { rank: SpatialRank::Two, op: PoolOp::Average },
        Self::Pooling { rank: SpatialRank::Three, op: PoolOp::Average },
        Self::Convolution { rank: SpatialRank::One },
        Self::Convolution { rank: SpatialRank::Two },
        Self::Convolution { rank: SpatialRank::Three },
        Self::Activation,
    ];

    /// Parses a layer kind, accepting common aliases.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let name = normalise(s);
        match name.as_str() {
            "dense" | "fullyconnected" | "fc" => return Some(Self::Dense),
            "flatten" => return Some(Self::Flatten),
            "dropout" => return Some(Self::Dropout),
            "activation" => return Some(Self::Activation),
            _ => {}
        }

        if let Some(rest) = name
            .strip_prefix("convolution")
            .or_else(|| name.strip_prefix("conv"))
        {
            return SpatialRank::from_suffix(rest).map(|rank| Self::Convolution { rank });
        }

        let (op, rest) = if let Some(rest) = name.strip_prefix("max") {
            (PoolOp::Max, rest)
        } else if let Some(rest) = name
            .strip_prefix("average")
            .or_else(|| name.strip_prefix("avg"))
        {
            (PoolOp::Average, rest)
        } else {
            return None;
        };
        let suffix = rest
            .strip_prefix("pooling")
            .or_else(|| rest.strip_prefix("pool"))?;
        SpatialRank::from_suffix(suffix).map(|rank| Self::Pooling { rank, op })
    }

    /// Parses a layer kind, failing on anything outside the vocabulary.
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        Self::from_str_loose(s).ok_or_else(|| ModelError::UnknownKind {
            vocabulary: "layer",
            value: s.to_string(),
        })
    }

    /// Returns the canonical kind name (e.g. `"maxpooling2d"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::Flatten => "flatten",
            Self::Dropout => "dropout",
            Self::Activation => "activation",
            Self::Pooling { rank, op: PoolOp::Max } => match rank {
                SpatialRank::One => "maxpooling1d",
                SpatialRank::Two => "maxpooling2d",
                SpatialRank::Three => "maxpooling3d",
            },
            Self::Pooling { rank, op: PoolOp::Average } => match rank {
                SpatialRank::One => "avgpooling1d",
                SpatialRank::Two => "avgpooling2d",
                SpatialRank::Three => "avgpooling3d",
            },
            Self::Convolution { rank } => match rank {
                SpatialRank::One => "conv1d",
                SpatialRank::Two => "conv2d",
                SpatialRank::Three => "conv3d",
            },
        }
    }

    pub fn is_pooling(&self) -> bool {
        matches!(self, Self::Pooling { .. })
    }

    /// Returns `true` for kinds that carry stride and padding fields.
    pub fn is_spatial(&self) -> bool {
        matches!(self, Self::Pooling { .. } | Self::Convolution { .. })
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activation function applied to a layer's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivationKind {
    Linear,
    Sigmoid,
    Relu,
    Tanh,
    Softmax,
}

impl ActivationKind {
    pub const ALL: [ActivationKind; 5] = [
        Self::Linear,
        Self::Sigmoid,
        Self::Relu,
        Self::Tanh,
        Self::Softmax,
    ];

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match normalise(s).as_str() {
            "linear" | "identity" | "none" => Some(Self::Linear),
            "sigmoid" | "logistic" => Some(Self::Sigmoid),
            "relu" => Some(Self::Relu),
            "tanh" => Some(Self::Tanh),
            "softmax" => Some(Self::Softmax),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self, ModelError> {
        Self::from_str_loose(s).ok_or_else(|| ModelError::UnknownKind {
            vocabulary: "activation",
            value: s.to_string(),
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Sigmoid => "sigmoid",
            Self::Relu => "relu",
            Self::Tanh => "tanh",
            Self::Softmax => "softmax",
        }
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Border handling of pooling and convolution windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaddingKind {
    Valid,
    Same,
}

impl PaddingKind {
    pub const ALL: [PaddingKind; 2] = [Self::Valid, Self::Same];

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match normalise(s).as_str() {
            "valid" => Some(Self::Valid),
            "same" => Some(Self::Same),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self, ModelError> {
        Self::from_str_loose(s).ok_or_else(|| ModelError::UnknownKind {
            vocabulary: "padding",
            value: s.to_string(),
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Same => "same",
        }
    }
}

impl fmt::Display for PaddingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalise(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Output activation shape of a layer. Non-spatial layers use `height = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputShape {
    pub width: usize,
    pub height: usize,
}

impl OutputShape {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// A flat vector of `width` units.
    pub fn vector(width: usize) -> Self {
        Self { width, height: 1 }
    }

    pub fn num_elements(&self) -> usize {
        self.width * self.height
    }
}

impl fmt::Display for OutputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pooling window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolSize {
    pub width: usize,
    pub height: usize,
}

/// Window step of pooling and convolution layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Strides {
    pub vertical: usize,
    pub horizontal: usize,
}

/// A single layer of the network.
///
/// Weight matrices are stored input-unit major: `weights[i][j]` connects
/// input unit `i` to output unit `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Optional human-readable name, used in diagnostics only.
    pub name: Option<String>,
    pub kind: LayerKind,
    pub output_shape: Option<OutputShape>,
    pub activation: Option<ActivationKind>,
    pub weights: Option<Vec<Vec<f32>>>,
    pub bias: Option<Vec<f32>>,
    pub pool_size: Option<PoolSize>,
    pub strides: Option<Strides>,
    pub padding: Option<PaddingKind>,
}

impl Layer {
    /// Creates a layer of the given kind with no fields set.
    pub fn new(kind: LayerKind) -> Self {
        Self {
            name: None,
            kind,
            output_shape: None,
            activation: None,
            weights: None,
            bias: None,
            pool_size: None,
            strides: None,
            padding: None,
        }
    }

    /// A dense layer whose output width is the weight matrix column count.
    pub fn dense(
        activation: ActivationKind,
        weights: Vec<Vec<f32>>,
        bias: Option<Vec<f32>>,
    ) -> Self {
        let width = weights.first().map_or(0, Vec::len);
        Self {
            output_shape: Some(OutputShape::vector(width)),
            activation: Some(activation),
            weights: Some(weights),
            bias,
            ..Self::new(LayerKind::Dense)
        }
    }

    pub fn flatten(width: usize) -> Self {
        Self::new(LayerKind::Flatten).with_output(OutputShape::vector(width))
    }

    pub fn dropout(shape: OutputShape) -> Self {
        Self::new(LayerKind::Dropout).with_output(shape)
    }

    pub fn activation(activation: ActivationKind, shape: OutputShape) -> Self {
        Self {
            activation: Some(activation),
            ..Self::new(LayerKind::Activation).with_output(shape)
        }
    }

    pub fn pooling(
        rank: SpatialRank,
        op: PoolOp,
        shape: OutputShape,
        pool_size: PoolSize,
        strides: Strides,
        padding: PaddingKind,
    ) -> Self {
        Self {
            pool_size: Some(pool_size),
            strides: Some(strides),
            padding: Some(padding),
            ..Self::new(LayerKind::Pooling { rank, op }).with_output(shape)
        }
    }

    pub fn convolution(
        rank: SpatialRank,
        shape: OutputShape,
        strides: Strides,
        padding: PaddingKind,
    ) -> Self {
        Self {
            strides: Some(strides),
            padding: Some(padding),
            ..Self::new(LayerKind::Convolution { rank }).with_output(shape)
        }
    }

    pub fn with_output(mut self, shape: OutputShape) -> Self {
        self.output_shape = Some(shape);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns a concise summary string for display.
    pub fn summary(&self) -> String {
        let shape = self
            .output_shape
            .map_or_else(|| "?".to_string(), |s| s.to_string());
        let mut s = format!("{} ({}) -> {shape}", self.name.as_deref().unwrap_or("-"), self.kind);
        if let Some(act) = self.activation {
            s.push_str(&format!(", {act}"));
        }
        if let Some(w) = &self.weights {
            s.push_str(&format!(
                ", weights {}x{}",
                w.len(),
                w.first().map_or(0, Vec::len)
            ));
        }
        if let Some(b) = &self.bias {
            s.push_str(&format!(", bias {}", b.len()));
        }
        s
    }
}
