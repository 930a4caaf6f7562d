// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # nnc
//!
//! Command-line interface for the neural-network-to-C translator.
//!
//! ## Usage
//! ```bash
//! # Translate a model manifest into _out/mnist/nn_model.{h,c}
//! nnc translate --model ./models/mnist.json --output mnist
//!
//! # Inspect model structure
//! nnc inspect --model ./models/mnist.json
//!
//! # Dump the rendered marker table as JSON
//! nnc markers --model ./models/mnist.json
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nnc",
    about = "Translates trained neural networks into native C inference code",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (CLI arguments override it).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a model manifest into a C header and source file.
    Translate {
        /// Path to the model manifest (JSON).
        #[arg(short, long)]
        model: PathBuf,

        /// Output name; its extension is dropped to form the directory name.
        #[arg(short, long)]
        output: String,

        /// Backend to translate with.
        #[arg(short, long, default_value = "gcc")]
        backend: String,

        /// Root directory for generated output (default: _out).
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Directory holding the header and body templates.
        #[arg(long)]
        template_dir: Option<PathBuf>,

        /// Fail if the header template does not consume every marker.
        #[arg(long)]
        strict: bool,
    },

    /// Inspect a model: print layers, shapes and parameter counts.
    Inspect {
        /// Path to the model manifest (JSON).
        #[arg(short, long)]
        model: PathBuf,
    },

    /// Print the marker table a model renders to, as JSON.
    Markers {
        /// Path to the model manifest (JSON).
        #[arg(short, long)]
        model: PathBuf,
    },

    /// List the available backends.
    Backends,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Translate {
            model,
            output,
            backend,
            out_dir,
            template_dir,
            strict,
        } => {
            let mut config = commands::load_config(cli.config.as_deref())?;
            if let Some(dir) = out_dir {
                config.output_root = dir;
            }
            if let Some(dir) = template_dir {
                config.template_dir = dir;
            }
            if strict {
                config.strict_markers = true;
            }
            commands::translate::execute(model, output, backend, config)
        }
        Commands::Inspect { model } => commands::inspect::execute(model),
        Commands::Markers { model } => commands::markers::execute(model),
        Commands::Backends => commands::backends::execute(),
    }
}
