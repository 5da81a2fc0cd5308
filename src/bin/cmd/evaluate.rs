// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Evaluate command - compute KPIs and cost.

use std::fs;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Subcommand;

use crate::common::{load_config, Result};
use roboeval::kpi::KpiTarget;
use roboeval::{ConstraintModel, ErrorTag, Evaluation, KpiKind};

/// Evaluate recorded runs.
#[derive(Subcommand, Clone, Debug)]
pub enum EvaluateCmd {
    /// Compute the KPI table of an archive
    Run {
        /// Input file (MCAP or BAG)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Evaluation config (TOML); all KPIs when omitted
        #[arg(short, long, value_name = "TOML")]
        config: Option<PathBuf>,

        /// Directory for computed_kpis.json and kpi_labels.json
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Ignore error samples before this time (seconds)
        #[arg(short, long, value_name = "SECS", allow_negative_numbers = true)]
        time_offset: Option<f64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List KPIs, error tags and constraint models
    List,
}

impl EvaluateCmd {
    pub fn run(self) -> Result<()> {
        match self {
            EvaluateCmd::Run {
                input,
                config,
                output,
                time_offset,
                json,
            } => cmd_run(input, config, output, time_offset, json),
            EvaluateCmd::List => cmd_list(),
        }
    }
}

/// Cmd: Evaluate an archive
fn cmd_run(
    input: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    time_offset: Option<f64>,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config.as_deref())?;
    if let Some(offset) = time_offset {
        config.time_offset = offset;
    }

    let evaluation = Evaluation::open(&input, &config)?;

    if let Some(dir) = &output {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        evaluation.save_kpis(dir)?;
        if !evaluation.cost_terms().is_empty() {
            evaluation.cost_function().save(dir)?;
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation.report())?);
        return Ok(());
    }

    println!("=== KPIs of {} ===", input.display());
    println!("Time offset: {} s", evaluation.time_offset());
    println!();

    let labels = evaluation.labels();
    for (tag, value) in evaluation.kpis() {
        let label = labels.get(tag).map(String::as_str).unwrap_or("");
        println!("  {:<34} {:>14.6}  {}", tag, value, label);
    }

    if !evaluation.failures().is_empty() {
        println!();
        println!("Failed:");
        for (tag, reason) in evaluation.failures() {
            println!("  {:<34} {}", tag, reason);
        }
    }

    if let Some(cost) = evaluation.report().cost {
        println!();
        println!("Cost: {cost:.6}");
    }

    let failed = evaluation.recording().summary().failed_passes();
    if !failed.is_empty() {
        println!();
        println!(
            "Warning: extraction passes failed: {}",
            failed
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(())
}

/// Cmd: List KPIs
fn cmd_list() -> Result<()> {
    println!("KPIs:");
    for kind in KpiKind::ALL {
        let target = match kind.target() {
            KpiTarget::Thrusters => "thrusters",
            KpiTarget::Error => "error",
        };
        println!("  {:<18} {}", kind.tag(), target);
    }

    println!();
    println!("Error tags:");
    for tag in ErrorTag::ALL {
        println!("  {tag}");
    }

    println!();
    println!("Constraint models:");
    for model in ConstraintModel::ALL {
        println!("  {model}");
    }

    Ok(())
}
