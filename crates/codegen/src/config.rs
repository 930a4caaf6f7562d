// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Translator configuration loaded from TOML files or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! template_dir = "./templates/gcc"
//! output_root = "_out"
//! marker_open = "{{"
//! marker_close = "}}"
//! strict_markers = false
//! ```

use crate::template::MarkerSyntax;
use crate::CodegenError;
use std::path::{Component, Path, PathBuf};

/// Directory of the templates bundled with this crate.
pub const BUNDLED_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/gcc");

/// Configuration for a translation backend.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Directory holding the header and body templates.
    pub template_dir: PathBuf,
    /// Directory under which one output directory per model is created.
    pub output_root: PathBuf,
    /// Opening marker delimiter.
    pub marker_open: String,
    /// Closing marker delimiter.
    pub marker_close: String,
    /// Fail if the header template leaves table entries unconsumed.
    pub strict_markers: bool,
}

impl TranslatorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, CodegenError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CodegenError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, CodegenError> {
        toml::from_str(toml_str)
            .map_err(|e| CodegenError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, CodegenError> {
        toml::to_string_pretty(self)
            .map_err(|e| CodegenError::ConfigError(format!("TOML serialise error: {e}")))
    }

    pub fn marker_syntax(&self) -> MarkerSyntax {
        MarkerSyntax::new(self.marker_open.clone(), self.marker_close.clone())
    }

    /// Returns the output directory for `output_name`: the name without its
    /// extension, below [`Self::output_root`].
    ///
    /// The result always stays under the output root: absolute names and
    /// names with `..` components are rejected.
    pub fn output_dir(&self, output_name: &str) -> Result<PathBuf, CodegenError> {
        let stem = Path::new(output_name.trim()).with_extension("");
        let escapes = stem.components().any(|c| {
            matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_))
        });
        if escapes || stem.as_os_str().is_empty() || stem.file_name().is_none() {
            return Err(CodegenError::InvalidOutputName(output_name.to_string()));
        }
        Ok(self.output_root.join(stem))
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        let syntax = MarkerSyntax::default();
        Self {
            template_dir: PathBuf::from(BUNDLED_TEMPLATE_DIR),
            output_root: PathBuf::from("_out"),
            marker_open: syntax.open,
            marker_close: syntax.close,
            strict_markers: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = TranslatorConfig::default();
        assert_eq!(c.output_root, PathBuf::from("_out"));
        assert_eq!(c.marker_syntax(), MarkerSyntax::default());
        assert!(!c.strict_markers);
        assert!(c.template_dir.ends_with("templates/gcc"));
    }

    #[test]
    fn test_from_toml() {
        let toml = r####"
template_dir = "/srv/templates"
output_root = "/tmp/generated"
marker_open = "###"
marker_close = "###"
strict_markers = true
"####;
        let c = TranslatorConfig::from_toml(toml).unwrap();
        assert_eq!(c.template_dir, PathBuf::from("/srv/templates"));
        assert_eq!(c.output_root, PathBuf::from("/tmp/generated"));
        assert_eq!(c.marker_syntax(), MarkerSyntax::hashes());
        assert!(c.strict_markers);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let c = TranslatorConfig::from_toml("output_root = \"build\"").unwrap();
        assert_eq!(c.output_root, PathBuf::from("build"));
        assert_eq!(c.marker_open, "{{");
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            TranslatorConfig::from_toml("strict_markers = \"yes\""),
            Err(CodegenError::ConfigError(_))
        ));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = TranslatorConfig::default();
        let back = TranslatorConfig::from_toml(&c.to_toml().unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_output_dir_strips_extension() {
        let c = TranslatorConfig::default();
        assert_eq!(c.output_dir("mnist.h").unwrap(), PathBuf::from("_out/mnist"));
        assert_eq!(c.output_dir("mnist").unwrap(), PathBuf::from("_out/mnist"));
        assert_eq!(
            c.output_dir("models/mnist.json").unwrap(),
            PathBuf::from("_out/models/mnist")
        );
    }

    #[test]
    fn test_output_dir_rejects_empty() {
        let c = TranslatorConfig::default();
        assert!(matches!(c.output_dir(""), Err(CodegenError::InvalidOutputName(_))));
        assert!(matches!(c.output_dir("  "), Err(CodegenError::InvalidOutputName(_))));
        assert!(matches!(c.output_dir(".."), Err(CodegenError::InvalidOutputName(_))));
    }

    #[test]
    fn test_output_dir_stays_under_root() {
        let c = TranslatorConfig::default();
        for name in ["../evil", "/tmp/evil.h", "a/../../evil", "models/../mnist"] {
            assert!(
                matches!(c.output_dir(name), Err(CodegenError::InvalidOutputName(_))),
                "accepted {name}"
            );
        }
    }

    #[test]
    fn test_from_missing_file() {
        assert!(TranslatorConfig::from_file(Path::new("/nonexistent/nnc.toml")).is_err());
    }
}
