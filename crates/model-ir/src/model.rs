// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The complete network as an ordered sequence of layers.

use crate::{Layer, LayerKind};
use std::fmt;

/// A trained network described layer by layer in execution order.
///
/// The model is read-only input to backends; its layer order is
/// semantically load-bearing and never changed after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct IntermediateModel {
    /// Human-readable model name (e.g., `"mnist-mlp"`).
    pub name: String,
    layers: Vec<Layer>,
}

impl IntermediateModel {
    pub fn new(name: impl Into<String>, layers: Vec<Layer>) -> Self {
        Self {
            name: name.into(),
            layers,
        }
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns the layers in execution order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn iter_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Total number of scalar parameters (weights + biases) of dense layers.
    pub fn total_parameters(&self) -> usize {
        self.layers
            .iter()
            .filter(|l| l.kind == LayerKind::Dense)
            .map(|l| {
                let w: usize = l.weights.iter().flatten().map(Vec::len).sum();
                let b = l.bias.as_ref().map_or(0, Vec::len);
                w + b
            })
            .sum()
    }

    /// Returns a summary string describing the model.
    pub fn summary(&self) -> String {
        format!(
            "Model '{}': {} layers, {} parameters",
            self.name,
            self.num_layers(),
            self.total_parameters(),
        )
    }
}

impl fmt::Display for IntermediateModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IntermediateModel '{}' ({} layers):", self.name, self.layers.len())?;
        for (i, layer) in self.layers.iter().enumerate() {
            writeln!(f, "  [{i}] {}", layer.summary())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActivationKind, OutputShape};

    fn mlp() -> IntermediateModel {
        IntermediateModel::new(
            "mlp",
            vec![
                Layer::flatten(4).with_name("in"),
                Layer::dense(ActivationKind::Relu, vec![vec![0.1; 3]; 4], Some(vec![0.0; 3]))
                    .with_name("fc1"),
                Layer::dropout(OutputShape::vector(3)),
                Layer::dense(ActivationKind::Softmax, vec![vec![0.2; 2]; 3], None).with_name("fc2"),
            ],
        )
    }

    #[test]
    fn test_layer_order_preserved() {
        let model = mlp();
        let kinds: Vec<_> = model.iter_layers().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![LayerKind::Flatten, LayerKind::Dense, LayerKind::Dropout, LayerKind::Dense]
        );
        assert_eq!(model.layer(1).unwrap().name.as_deref(), Some("fc1"));
        assert!(model.layer(4).is_none());
    }

    #[test]
    fn test_total_parameters() {
        // fc1: 4*3 + 3, fc2: 3*2.
        assert_eq!(mlp().total_parameters(), 12 + 3 + 6);
    }

    #[test]
    fn test_empty() {
        let model = IntermediateModel::new("empty", vec![]);
        assert!(model.is_empty());
        assert_eq!(model.total_parameters(), 0);
    }

    #[test]
    fn test_summary_and_display() {
        let model = mlp();
        assert!(model.summary().contains("4 layers"));
        let display = format!("{model}");
        assert!(display.contains("[0] in (flatten)"));
        assert!(display.contains("[3] fc2 (dense)"));
    }
}
