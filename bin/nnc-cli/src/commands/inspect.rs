// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `nnc inspect` command: display model structure and the derived codes.
//!
//! Loads the manifest, runs parameter extraction and prints one row per
//! layer with the numeric codes the generated header will carry.

use codegen::LayerCode;
use std::path::PathBuf;

pub fn execute(model: PathBuf) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║               nnc · Model Inspector                 ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let ir = super::load_model(&model)?;

    // ── Summary ────────────────────────────────────────────────
    println!("  Model: {}", ir.name);
    println!("  Layers: {}", ir.num_layers());
    println!("  Parameters: {}", ir.total_parameters());
    println!();

    // ── Per-Layer Detail ───────────────────────────────────────
    println!(
        "  {:<4} {:<24} {:<16} {:>5} {:>10} {:<8} {:>8}",
        "Idx", "Name", "Kind", "Code", "Output", "Activ.", "Params",
    );
    println!("  {}", "-".repeat(82));

    for (i, layer) in ir.iter_layers().enumerate() {
        let output = layer
            .output_shape
            .map_or_else(|| "?".to_string(), |s| s.to_string());
        let activation = layer.activation.map_or("-", |a| a.as_str());
        let params = layer.weights.iter().flatten().map(Vec::len).sum::<usize>()
            + layer.bias.as_ref().map_or(0, Vec::len);
        println!(
            "  {:<4} {:<24} {:<16} {:>5} {:>10} {:<8} {:>8}",
            i,
            super::truncate(layer.name.as_deref().unwrap_or("-"), 24),
            layer.kind.as_str(),
            layer.kind.code(),
            output,
            activation,
            params,
        );
    }
    println!();

    // ── Extraction Check ───────────────────────────────────────
    // Catches the same input errors translate would, without writing files.
    match codegen::extract(&ir) {
        Ok(params) => {
            println!("  Extraction: OK");
            println!("   Weights:   {} values", params.weights.len());
            println!("   Bias:      {} values", params.bias.len());
        }
        Err(e) => {
            tracing::warn!("extraction failed: {e}");
            println!("  Extraction: FAILED ({e})");
        }
    }
    println!();
    Ok(())
}
