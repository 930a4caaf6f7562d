// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `nnc translate` command: render a model into `nn_model.h` / `nn_model.c`.
//!
//! ```text
//! manifest → IntermediateModel → backend.translate() → <out_dir>/<name>/
//! ```

use codegen::TranslatorConfig;
use std::path::PathBuf;

pub fn execute(
    model: PathBuf,
    output: String,
    backend: String,
    config: TranslatorConfig,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║               nnc · Model Translator                ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    // ── Configuration ──────────────────────────────────────────
    println!("  Config:");
    println!("   Model:      {}", model.display());
    println!("   Output:     {output}");
    println!("   Backend:    {backend}");
    println!("   Templates:  {}", config.template_dir.display());
    println!("   Out root:   {}", config.output_root.display());
    println!(
        "   Markers:    {}name{}{}",
        config.marker_open,
        config.marker_close,
        if config.strict_markers { " (strict)" } else { "" },
    );
    println!();

    // Step 1: load the IR.
    println!("  [1/2] Loading model...");
    let ir = super::load_model(&model)?;
    println!("        {}", ir.summary());
    println!();

    // Step 2: translate.
    let backend = codegen::backend_by_name(&backend, config)?;
    println!("  [2/2] Translating with {}...", backend.description());
    let artifacts = backend.translate(&ir, &output)?;
    println!();

    println!("  Generated:");
    println!("   {}", artifacts.header_path.display());
    println!("   {}", artifacts.body_path.display());
    println!();
    Ok(())
}
