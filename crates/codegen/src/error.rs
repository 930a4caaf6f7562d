// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the translation pipeline.

use std::path::PathBuf;

/// Errors that can occur while translating a model into native source.
///
/// Variants fall into four groups: malformed input IR, template/marker
/// mismatches, filesystem failures (always carrying the path involved) and
/// configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// The model has no layers.
    #[error("model '{0}' contains no layers")]
    EmptyModel(String),

    /// A kind string is outside its closed vocabulary.
    #[error("unrecognised {vocabulary} kind '{value}'")]
    UnknownKind {
        vocabulary: &'static str,
        value: String,
    },

    /// A layer lacks a field its kind requires.
    #[error("layer {position} ({kind}) is missing required field '{field}'")]
    MissingField {
        position: usize,
        kind: String,
        field: &'static str,
    },

    /// A layer field is present but unusable.
    #[error("layer {position} has invalid field '{field}': {detail}")]
    InvalidField {
        position: usize,
        field: &'static str,
        detail: String,
    },

    /// The requested output name does not name a directory.
    #[error("invalid output name '{0}'")]
    InvalidOutputName(String),

    /// A template references a marker the table does not define.
    #[error("template references undefined marker '{marker}'")]
    UndefinedMarker { marker: String },

    /// Strict mode: the table defines markers the template never uses.
    #[error("template does not consume markers: {}", .0.join(", "))]
    UnusedMarkers(Vec<String>),

    /// The same marker name was inserted into a table twice.
    #[error("duplicate marker '{0}'")]
    DuplicateMarker(String),

    /// A template resource could not be read.
    #[error("template not found at '{path}': {source}")]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created.
    #[error("cannot create output directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact file could not be written.
    #[error("cannot write '{path}': {source}")]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The body template could not be copied into the output directory.
    #[error("cannot copy '{from}' to '{to}': {source}")]
    CopyArtifact {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The IR could not be loaded.
    #[error("model error: {0}")]
    ModelError(#[from] model_ir::ModelError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl CodegenError {
    /// Returns `true` for errors caused by malformed input IR.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyModel(_)
                | Self::UnknownKind { .. }
                | Self::MissingField { .. }
                | Self::InvalidField { .. }
                | Self::InvalidOutputName(_)
                | Self::ModelError(_)
        )
    }
}
