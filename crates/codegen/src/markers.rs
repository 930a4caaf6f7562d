// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The marker vocabulary and the table that maps each marker to its
//! rendered value.

use crate::codec::{render_flags, render_floats, render_list, render_optional};
use crate::extract::{extract, ExtractedParameters, FlattenedParams};
use crate::CodegenError;
use model_ir::IntermediateModel;
use std::collections::BTreeMap;
use std::fmt;

/// A marker of the header template vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marker {
    NumberOfLayers,
    DimNumberOfLayers,
    LayerTypes,
    LayerOutputWidth,
    LayerOutputHeight,
    ActivationFunctions,
    Weights,
    DimWeights,
    IndicesWeights,
    Bias,
    DimBias,
    IndicesBias,
    UseBias,
    PoolWidth,
    PoolHeight,
    VerticalStride,
    HorizontalStride,
    Padding,
}

impl Marker {
    pub const ALL: [Marker; 18] = [
        Self::NumberOfLayers,
        Self::DimNumberOfLayers,
        Self::LayerTypes,
        Self::LayerOutputWidth,
        Self::LayerOutputHeight,
        Self::ActivationFunctions,
        Self::Weights,
        Self::DimWeights,
        Self::IndicesWeights,
        Self::Bias,
        Self::DimBias,
        Self::IndicesBias,
        Self::UseBias,
        Self::PoolWidth,
        Self::PoolHeight,
        Self::VerticalStride,
        Self::HorizontalStride,
        Self::Padding,
    ];

    /// The name templates refer to this marker by.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NumberOfLayers => "numberOfLayers",
            Self::DimNumberOfLayers => "dimNumberOfLayers",
            Self::LayerTypes => "layerTypes",
            Self::LayerOutputWidth => "layerOutputWidth",
            Self::LayerOutputHeight => "layerOutputHeight",
            Self::ActivationFunctions => "activationFunctions",
            Self::Weights => "weights",
            Self::DimWeights => "dimWeights",
            Self::IndicesWeights => "indicesWeights",
            Self::Bias => "bias",
            Self::DimBias => "dimBias",
            Self::IndicesBias => "indicesBias",
            Self::UseBias => "useBias",
            Self::PoolWidth => "poolWidth",
            Self::PoolHeight => "poolHeight",
            Self::VerticalStride => "verticalStride",
            Self::HorizontalStride => "horizontalStride",
            Self::Padding => "padding",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Marker name → rendered value, for one translation.
///
/// Entries are kept ordered so that iteration and serialization are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct MarkerTable {
    entries: BTreeMap<String, String>,
}

impl MarkerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value under `name`. Marker names are unique per table.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl fmt::Display,
    ) -> Result<(), CodegenError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(CodegenError::DuplicateMarker(name));
        }
        self.entries.insert(name, value.to_string());
        Ok(())
    }

    pub fn set(&mut self, marker: Marker, value: impl fmt::Display) -> Result<(), CodegenError> {
        self.insert(marker.name(), value)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders every marker of the vocabulary from extracted parameters.
    pub fn from_parameters(p: &ExtractedParameters) -> Result<Self, CodegenError> {
        let mut table = Self::new();
        table.set(Marker::NumberOfLayers, p.number_of_layers)?;
        table.set(Marker::DimNumberOfLayers, p.number_of_layers.saturating_sub(1))?;
        table.set(Marker::LayerTypes, render_list(&p.layer_types))?;
        table.set(Marker::LayerOutputWidth, render_list(&p.output_widths))?;
        table.set(Marker::LayerOutputHeight, render_list(&p.output_heights))?;
        table.set(Marker::ActivationFunctions, render_list(&p.activations))?;

        table.set(Marker::Weights, render_floats(p.weights.values()))?;
        table.set(Marker::DimWeights, p.weights.len())?;
        table.set(Marker::IndicesWeights, render_offsets(&p.weights))?;

        table.set(Marker::Bias, render_floats(p.bias.values()))?;
        table.set(Marker::DimBias, p.bias.len())?;
        table.set(Marker::IndicesBias, render_offsets(&p.bias))?;
        table.set(Marker::UseBias, render_flags(&p.use_bias))?;

        table.set(Marker::PoolWidth, render_optional(&p.pool_widths))?;
        table.set(Marker::PoolHeight, render_optional(&p.pool_heights))?;
        table.set(Marker::VerticalStride, render_optional(&p.vertical_strides))?;
        table.set(Marker::HorizontalStride, render_optional(&p.horizontal_strides))?;
        table.set(Marker::Padding, render_optional(&p.padding))?;
        Ok(table)
    }
}

fn render_offsets(params: &FlattenedParams) -> String {
    render_optional(params.offsets())
}

/// Extracts parameters from `model` and renders the full marker table.
pub fn build_marker_table(model: &IntermediateModel) -> Result<MarkerTable, CodegenError> {
    let params = extract(model)?;
    let table = MarkerTable::from_parameters(&params)?;
    tracing::debug!("built marker table with {} entries", table.len());
    Ok(table)
}
