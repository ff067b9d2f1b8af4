// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Dapcodec CLI
//!
//! Command-line tool for exercising DAP 2.0 responses against the
//! built-in demo datasets.
//!
//! ## Usage
//!
//! ```sh
//! # Print the schema response
//! dapcodec dds grid2d
//!
//! # Print attributes under a constraint
//! dapcodec das grid2d --constraint p.p
//!
//! # Write a sliced binary response
//! dapcodec dods grid2d --constraint 'p.p[0][0]' -o response.dods
//!
//! # Summarize the tree
//! dapcodec inspect grid3d --json
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{DasCmd, DdsCmd, DodsCmd, InspectCmd};
use common::Result;

/// Dapcodec - OPeNDAP response toolkit
///
/// Render DDS, DAS, and DODS responses for DAP 2.0 datasets, applying
/// client constraint expressions.
#[derive(Parser, Clone)]
#[command(name = "dapcodec")]
#[command(about = "OPeNDAP (DAP 2.0) response toolkit", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Print the DDS schema response
    Dds(DdsCmd),

    /// Print the DAS attribute response
    Das(DasCmd),

    /// Write the binary DODS response
    Dods(DodsCmd),

    /// Summarize a demo dataset tree
    Inspect(InspectCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dds(cmd) => cmd.run(),
        Commands::Das(cmd) => cmd.run(),
        Commands::Dods(cmd) => cmd.run(),
        Commands::Inspect(cmd) => cmd.run(),
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
