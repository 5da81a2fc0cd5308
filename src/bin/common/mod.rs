// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use anyhow::Context as _;
use roboeval::EvaluationConfig;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Format a duration in seconds to human-readable string.
pub fn format_duration(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "-".to_string();
    }
    let millis = (secs * 1000.0).round() as u64;
    let whole = millis / 1000;

    if whole >= 3600 {
        format!("{}h {}m", whole / 3600, (whole % 3600) / 60)
    } else if whole >= 60 {
        format!("{}m {}s", whole / 60, whole % 60)
    } else if whole > 0 {
        format!("{}.{:03}s", whole, millis % 1000)
    } else {
        format!("{}ms", millis)
    }
}

/// Format a time stamp in seconds.
///
/// Simulation clocks start near zero; those are printed as plain seconds.
/// Anything after 2000-01-01 is printed as a UTC date.
pub fn format_timestamp(secs: f64) -> String {
    const Y2000: f64 = 946_684_800.0;

    if secs < Y2000 {
        return format!("{secs:.3} s");
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9) as u32;
    match chrono::DateTime::<chrono::Utc>::from_timestamp(whole as i64, nanos) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string(),
        None => format!("{secs:.3} s"),
    }
}

/// Load an evaluation config, or the default one.
pub fn load_config(path: Option<&Path>) -> Result<EvaluationConfig> {
    match path {
        Some(path) => EvaluationConfig::load_from_path(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(EvaluationConfig::default()),
    }
}
