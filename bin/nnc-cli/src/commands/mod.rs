// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI setup.

pub mod backends;
pub mod inspect;
pub mod markers;
pub mod translate;

use codegen::TranslatorConfig;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the translator configuration, falling back to defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<TranslatorConfig> {
    match path {
        Some(path) => {
            let config = TranslatorConfig::from_file(path)?;
            tracing::debug!("loaded configuration from '{}'", path.display());
            Ok(config)
        }
        None => Ok(TranslatorConfig::default()),
    }
}

/// Loads a model manifest, attaching the path to any error.
pub fn load_model(path: &Path) -> anyhow::Result<model_ir::IntermediateModel> {
    model_ir::ModelLoader::load(path)
        .map_err(|e| anyhow::anyhow!("failed to load model from '{}': {e}", path.display()))
}

/// Truncates a string to `max_len` with ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
