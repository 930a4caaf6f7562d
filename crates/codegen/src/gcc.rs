// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! GCC backend: emits a C header holding the network description and
//! parameters, next to a fixed C source implementing inference over it.

use crate::backend::Backend;
use crate::extract::extract;
use crate::template::Template;
use crate::writer::ArtifactWriter;
use crate::{CodegenError, GeneratedArtifacts, MarkerTable, TranslatorConfig};
use model_ir::IntermediateModel;
use std::path::PathBuf;

/// Header template filename inside the template directory.
pub const HEADER_TEMPLATE: &str = "nn_model.h.template";

/// Body template filename inside the template directory.
pub const BODY_TEMPLATE: &str = "nn_model.c.template";

/// Translates the IR to native C code.
#[derive(Debug, Clone, Default)]
pub struct GccBackend {
    config: TranslatorConfig,
}

impl GccBackend {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn header_template_path(&self) -> PathBuf {
        self.config.template_dir.join(HEADER_TEMPLATE)
    }

    pub fn body_template_path(&self) -> PathBuf {
        self.config.template_dir.join(BODY_TEMPLATE)
    }

    /// Loads and parses the header template.
    pub fn header_template(&self) -> Result<Template, CodegenError> {
        let path = self.header_template_path();
        let text = std::fs::read_to_string(&path)
            .map_err(|source| CodegenError::TemplateNotFound { path, source })?;
        Template::parse(&text, &self.config.marker_syntax())
    }

    /// Renders the header for `model` without touching the output directory.
    pub fn render_header(&self, model: &IntermediateModel) -> Result<String, CodegenError> {
        let params = extract(model)?;
        let table = MarkerTable::from_parameters(&params)?;
        self.render_table(&table)
    }

    fn render_table(&self, table: &MarkerTable) -> Result<String, CodegenError> {
        let template = self.header_template()?;
        if self.config.strict_markers {
            template.check_vocabulary(table)?;
        } else {
            let unused = template.unused_markers(table);
            if !unused.is_empty() {
                tracing::debug!("header template ignores markers: {}", unused.join(", "));
            }
        }
        template.render(table)
    }
}

impl Backend for GccBackend {
    fn name(&self) -> &str {
        "gcc"
    }

    fn description(&self) -> &str {
        "GCC Backend Plugin"
    }

    fn translate(
        &self,
        model: &IntermediateModel,
        output_name: &str,
    ) -> Result<GeneratedArtifacts, CodegenError> {
        let output_dir = self.config.output_dir(output_name)?;
        tracing::info!("translating {} with backend '{}'", model.summary(), self.name());

        let header = self.render_header(model)?;
        let artifacts = ArtifactWriter::new(output_dir).write(&header, &self.body_template_path())?;

        tracing::info!(
            "generated '{}' for model '{}'",
            artifacts.output_dir.display(),
            model.name,
        );
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Marker;
    use model_ir::{ActivationKind, Layer};

    fn tiny_model() -> IntermediateModel {
        IntermediateModel::new(
            "tiny",
            vec![Layer::dense(ActivationKind::Relu, vec![vec![0.5]], Some(vec![0.1]))],
        )
    }

    #[test]
    fn test_bundled_header_consumes_whole_vocabulary() {
        let backend = GccBackend::default();
        let template = backend.header_template().unwrap();
        let expected: std::collections::BTreeSet<&str> =
            Marker::ALL.iter().map(Marker::name).collect();
        assert_eq!(template.markers(), expected);
    }

    #[test]
    fn test_bundled_body_has_no_markers() {
        let backend = GccBackend::default();
        let text = std::fs::read_to_string(backend.body_template_path()).unwrap();
        let template = Template::parse(&text, &backend.config().marker_syntax()).unwrap();
        assert!(template.is_static());
    }

    #[test]
    fn test_render_header_strict() {
        let backend = GccBackend::new(TranslatorConfig {
            strict_markers: true,
            ..Default::default()
        });
        let header = backend.render_header(&tiny_model()).unwrap();
        assert!(header.contains("#define NN_NUMBER_OF_LAYERS 1"));
        assert!(!header.contains("{{"));
    }

    #[test]
    fn test_missing_template_dir() {
        let backend = GccBackend::new(TranslatorConfig {
            template_dir: PathBuf::from("/nonexistent/templates"),
            ..Default::default()
        });
        match backend.render_header(&tiny_model()) {
            Err(CodegenError::TemplateNotFound { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/templates").join(HEADER_TEMPLATE));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
