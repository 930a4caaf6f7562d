// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`Backend`] trait and backend lookup by name.

use crate::gcc::GccBackend;
use crate::{CodegenError, GeneratedArtifacts, TranslatorConfig};
use model_ir::IntermediateModel;

/// A translator from the IR to native source for one target toolchain.
///
/// A backend owns no state across calls: each [`Backend::translate`] builds
/// its own marker table, so translations of different models into different
/// output names may run in parallel.
pub trait Backend: Send + Sync {
    /// Short identifier used to select the backend (e.g. `"gcc"`).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Translates `model` and writes the artifacts for `output_name`.
    fn translate(
        &self,
        model: &IntermediateModel,
        output_name: &str,
    ) -> Result<GeneratedArtifacts, CodegenError>;
}

/// Names of all built-in backends.
pub fn available_backends() -> &'static [&'static str] {
    &["gcc"]
}

/// Creates the backend registered under `name`.
pub fn backend_by_name(
    name: &str,
    config: TranslatorConfig,
) -> Result<Box<dyn Backend>, CodegenError> {
    match name.to_lowercase().as_str() {
        "gcc" | "c" => Ok(Box::new(GccBackend::new(config))),
        other => Err(CodegenError::ConfigError(format!(
            "unknown backend '{other}'; expected one of: {}",
            available_backends().join(", ")
        ))),
    }
}
