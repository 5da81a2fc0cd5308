// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show archive information, roles and extraction outcomes.

use std::path::PathBuf;

use clap::Subcommand;

use crate::common::{format_duration, format_timestamp, Result};
use roboeval::{classify, open_source, PassOutcome, Recording};

/// Inspect archive contents.
#[derive(Subcommand, Clone, Debug)]
pub enum InspectCmd {
    /// Show the archive format and channel catalogue
    Info {
        /// Input file (MCAP or BAG)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Filter channels by pattern
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show which channel was discovered for each role
    Roles {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Run the extraction and show per-pass outcomes
    Extract {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the extraction summary as JSON
        #[arg(long)]
        json: bool,
    },
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        match self {
            InspectCmd::Info { input, filter } => cmd_info(input, filter),
            InspectCmd::Roles { input } => cmd_roles(input),
            InspectCmd::Extract { input, json } => cmd_extract(input, json),
        }
    }
}

/// Cmd: Show archive info
fn cmd_info(input: PathBuf, filter: Option<String>) -> Result<()> {
    let source = open_source(&input)?;

    println!("=== {} ===", input.display());
    println!("Format: {}", source.format());
    println!("Channels: {}", source.channels().len());
    println!();

    let pattern = filter.map(|p| p.to_lowercase());
    for channel in source.channels() {
        if let Some(pattern) = &pattern {
            if !channel.topic.to_lowercase().contains(pattern)
                && !channel.message_type.to_lowercase().contains(pattern)
            {
                continue;
            }
        }
        println!(
            "  [{}] {} | {} | {} | {} messages",
            channel.id, channel.topic, channel.message_type, channel.encoding, channel.message_count
        );
    }

    Ok(())
}

/// Cmd: Show role assignment
fn cmd_roles(input: PathBuf) -> Result<()> {
    let source = open_source(&input)?;
    let assignment = classify(source.channels());

    println!("=== Roles in {} ===", input.display());
    println!();
    if assignment.is_empty() {
        println!("(no role discovered)");
        return Ok(());
    }
    for (role, channel) in assignment.iter() {
        println!("  {:<26} {}", role.as_str(), channel);
    }

    Ok(())
}

/// Cmd: Run the extraction
fn cmd_extract(input: PathBuf, json: bool) -> Result<()> {
    let recording = Recording::open(&input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(recording.summary())?);
        return Ok(());
    }

    println!("=== Extraction of {} ===", input.display());
    println!("Format: {}", recording.format());
    println!();

    for (pass, outcome) in recording.summary().iter() {
        let status = match outcome {
            PassOutcome::Extracted { records } => format!("{records} records"),
            PassOutcome::Absent => "absent".to_string(),
            PassOutcome::Failed { reason } => format!("FAILED: {reason}"),
        };
        println!("  {:<26} {}", pass.as_str(), status);
    }
    println!();

    println!("Desired points: {}", recording.desired().len());
    println!("Actual points: {}", recording.actual().len());
    println!("Thrusters: {}", recording.n_thrusters());
    println!("Fins: {}", recording.n_fins());

    if let (Ok(start), Ok(end)) = (recording.start_time(), recording.end_time()) {
        println!("Start: {}", format_timestamp(start));
        println!("End: {}", format_timestamp(end));
        println!("Duration: {}", format_duration(end - start));
    }

    Ok(())
}
