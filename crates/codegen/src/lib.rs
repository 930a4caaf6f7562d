// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # codegen
//!
//! Translates a [`model_ir::IntermediateModel`] into native inference source.
//!
//! The pipeline runs strictly in one direction:
//!
//! ```text
//! IntermediateModel
//!   → extract()            per-layer codes, shapes, flattened parameters
//!   → MarkerTable          marker name → rendered text
//!   → Template::render()   header template with every marker substituted
//!   → ArtifactWriter       <output_root>/<name>/nn_model.h + nn_model.c
//! ```
//!
//! Backends implement [`Backend`]; [`GccBackend`] is the built-in C target.
//!
//! # Required layer fields
//!
//! | Kind | Required |
//! |---|---|
//! | dense | output shape, activation, weights |
//! | flatten, dropout | output shape |
//! | activation | output shape, activation |
//! | pooling | output shape, pool size, strides, padding |
//! | convolution | output shape, strides, padding |
//!
//! # Example
//! ```no_run
//! use codegen::{Backend, GccBackend, TranslatorConfig};
//! use model_ir::ModelLoader;
//! use std::path::Path;
//!
//! let model = ModelLoader::load(Path::new("./models/mnist.json")).unwrap();
//! let backend = GccBackend::new(TranslatorConfig::default());
//! let artifacts = backend.translate(&model, "mnist").unwrap();
//! println!("header: {}", artifacts.header_path.display());
//! ```

mod backend;
pub mod codec;
mod config;
mod error;
pub mod extract;
mod gcc;
mod markers;
pub mod template;
mod writer;

pub use backend::{available_backends, backend_by_name, Backend};
pub use codec::LayerCode;
pub use config::{TranslatorConfig, BUNDLED_TEMPLATE_DIR};
pub use error::CodegenError;
pub use extract::{extract, ExtractedParameters, FlattenedParams};
pub use gcc::{GccBackend, BODY_TEMPLATE, HEADER_TEMPLATE};
pub use markers::{build_marker_table, Marker, MarkerTable};
pub use template::{MarkerSyntax, Template};
pub use writer::{ArtifactWriter, GeneratedArtifacts, BODY_FILE, HEADER_FILE};
