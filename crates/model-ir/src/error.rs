// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for manifest parsing and IR construction.

/// Errors that can occur when building an [`crate::IntermediateModel`].
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The model manifest file could not be read.
    #[error("failed to read manifest '{path}': {source}")]
    ManifestReadError {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest JSON is malformed.
    #[error("failed to parse manifest: {0}")]
    ManifestParseError(#[from] serde_json::Error),

    /// A kind string does not belong to its closed vocabulary.
    #[error("unrecognised {vocabulary} kind '{value}'")]
    UnknownKind {
        vocabulary: &'static str,
        value: String,
    },

    /// A layer entry is invalid (unknown kind, malformed field).
    #[error("invalid layer at position {position}: {detail}")]
    InvalidLayer { position: usize, detail: String },
}
