// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Artifact writer: materialises the rendered header and the verbatim body
//! source in an output directory.
//!
//! The writer does not lock the directory. Concurrent writes into the same
//! directory are last-writer-wins.

use crate::CodegenError;
use std::path::{Path, PathBuf};

/// Filename of the rendered header inside the output directory.
pub const HEADER_FILE: &str = "nn_model.h";

/// Filename of the copied body source inside the output directory.
pub const BODY_FILE: &str = "nn_model.c";

/// Paths of the files produced by one translation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GeneratedArtifacts {
    pub output_dir: PathBuf,
    pub header_path: PathBuf,
    pub body_path: PathBuf,
}

/// Writes the artifact pair into one output directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes `header` to [`HEADER_FILE`] and copies `body_template` to
    /// [`BODY_FILE`], replacing any previous content.
    ///
    /// The body template is checked before anything is written. If copying
    /// it fails anyway, both artifact files are removed, including a body
    /// from an earlier run, so that no mismatched pair is left behind.
    pub fn write(
        &self,
        header: &str,
        body_template: &Path,
    ) -> Result<GeneratedArtifacts, CodegenError> {
        std::fs::metadata(body_template).map_err(|source| CodegenError::TemplateNotFound {
            path: body_template.to_path_buf(),
            source,
        })?;

        std::fs::create_dir_all(&self.output_dir).map_err(|source| CodegenError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let header_path = self.output_dir.join(HEADER_FILE);
        std::fs::write(&header_path, header).map_err(|source| CodegenError::WriteArtifact {
            path: header_path.clone(),
            source,
        })?;

        let body_path = self.output_dir.join(BODY_FILE);
        if let Err(source) = std::fs::copy(body_template, &body_path) {
            // Neither the new header nor a body left over from an earlier run
            // may survive next to each other.
            for stale in [&header_path, &body_path] {
                match std::fs::remove_file(stale) {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => tracing::warn!("could not remove '{}': {e}", stale.display()),
                }
            }
            return Err(CodegenError::CopyArtifact {
                from: body_template.to_path_buf(),
                to: body_path,
                source,
            });
        }

        tracing::info!(
            "wrote {} ({} bytes) and {}",
            header_path.display(),
            header.len(),
            body_path.display(),
        );

        Ok(GeneratedArtifacts {
            output_dir: self.output_dir.clone(),
            header_path,
            body_path,
        })
    }
}
