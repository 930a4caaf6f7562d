// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # model-ir
//!
//! A backend-agnostic intermediate representation (IR) of a trained
//! feed-forward network, as consumed by the code-generation backends.
//!
//! - [`LayerKind`], [`ActivationKind`], [`PaddingKind`]: the closed kind
//!   vocabularies.
//! - [`Layer`]: one layer with its kind, output shape and the
//!   kind-dependent parameters (weights, bias, pool size, strides, padding).
//! - [`IntermediateModel`]: the network as an ordered sequence of layers.
//! - [`ModelManifest`] / [`ModelLoader`]: the JSON form of the IR and its
//!   conversion into typed layers.
//!
//! # Example
//! ```no_run
//! use model_ir::ModelLoader;
//! use std::path::Path;
//!
//! let model = ModelLoader::load(Path::new("./models/mnist.json")).unwrap();
//! println!("{}", model.summary());
//! for layer in model.iter_layers() {
//!     println!("  {}", layer.summary());
//! }
//! ```

mod error;
mod layer;
mod loader;
mod manifest;
mod model;

pub use error::ModelError;
pub use layer::{
    ActivationKind, Layer, LayerKind, OutputShape, PaddingKind, PoolOp, PoolSize, SpatialRank,
    Strides,
};
pub use loader::ModelLoader;
pub use manifest::{ManifestLayer, ModelManifest};
pub use model::IntermediateModel;
