// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `nnc backends` command: list the built-in translation backends.

use codegen::TranslatorConfig;

pub fn execute() -> anyhow::Result<()> {
    println!("  {:<10} {}", "Name", "Description");
    println!("  {}", "-".repeat(40));
    for name in codegen::available_backends() {
        let backend = codegen::backend_by_name(name, TranslatorConfig::default())?;
        println!("  {:<10} {}", backend.name(), backend.description());
    }
    Ok(())
}
