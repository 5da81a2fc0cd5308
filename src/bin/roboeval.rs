// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Roboeval CLI
//!
//! Command-line evaluation of recorded vehicle runs.
//!
//! ## Usage
//!
//! ```sh
//! # Show archive information and discovered roles
//! roboeval inspect info run.bag
//!
//! # Run the extraction and show per-pass outcomes
//! roboeval inspect extract run.mcap
//!
//! # Compute the KPI table and the cost
//! roboeval evaluate run run.bag --config evaluation.toml --output results/
//!
//! # List available KPIs and error tags
//! roboeval evaluate list
//! ```
//!
//! Log verbosity follows `RUST_LOG` and defaults to `info`.

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{EvaluateCmd, InspectCmd};
use common::Result;
use tracing_subscriber::EnvFilter;

/// Roboeval - evaluation of recorded underwater vehicle runs
///
/// Extracts trajectories and actuator data from ROS1 bag or MCAP archives
/// and computes tracking and effort KPIs.
#[derive(Parser, Clone)]
#[command(name = "roboeval")]
#[command(about = "KPI evaluation for recorded UUV runs", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Inspect an archive (info, roles, extraction)
    #[command(subcommand)]
    Inspect(InspectCmd),

    /// Evaluate KPIs and cost
    #[command(subcommand)]
    Evaluate(EvaluateCmd),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Evaluate(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
