// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `nnc markers` command: print the rendered marker table as JSON.
//!
//! Output goes to stdout without decoration so it can be piped.

use std::path::PathBuf;

pub fn execute(model: PathBuf) -> anyhow::Result<()> {
    let ir = super::load_model(&model)?;
    let table = codegen::build_marker_table(&ir)?;
    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(())
}
