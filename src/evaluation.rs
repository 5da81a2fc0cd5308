// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Evaluation sessions.
//!
//! An [`Evaluation`] owns one [`Recording`], computes its KPI table once and
//! combines the values into a cost. The table and the cost terms come from an
//! [`EvaluationConfig`], usually loaded from TOML:
//!
//! ```toml
//! time_offset = 5.0
//!
//! [[kpis]]
//! func = "rmse"
//! args = "position"
//!
//! [[kpis]]
//! func = "max_abs_thrust"
//!
//! [cost.weights]
//! rmse_position = 1.0
//! max_abs_thrust = 0.01
//!
//! [[cost.constraints]]
//! type = "PenaltyFunction"
//! tag = "thrust_limit"
//! input_tag = "max_abs_thrust"
//! params = { c = 1.0, gain = 1.0, offset = 200.0, n = 2.0 }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{EvalError, Result};
use crate::cost::{Constraint, CostFunction};
use crate::io::FileFormat;
use crate::kpi::{self, Kpi, KpiKind};
use crate::recording::{ExtractionSummary, Recording};
use crate::tracking::{ErrorSet, ErrorTag};

/// KPI values file written by [`Evaluation::save_kpis`].
pub const KPI_VALUES_FILE: &str = "computed_kpis.json";
/// KPI labels file written by [`Evaluation::save_kpis`].
pub const KPI_LABELS_FILE: &str = "kpi_labels.json";
/// KPI failures file, written only when some KPI failed.
pub const KPI_FAILURES_FILE: &str = "kpi_failures.json";

/// One KPI table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KpiEntry {
    /// KPI tag, e.g. `rmse`.
    pub func: String,
    /// Error tag of error metrics, e.g. `yaw`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
}

/// One constraint entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstraintEntry {
    #[serde(rename = "type")]
    pub model: String,
    pub tag: String,
    pub input_tag: String,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostConfig {
    /// Weight per KPI full tag.
    pub weights: BTreeMap<String, f64>,
    pub constraints: Vec<ConstraintEntry>,
}

/// Evaluation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Error samples stamped before this time (seconds) are ignored.
    pub time_offset: f64,
    /// KPI table. `None` selects every KPI, error metrics expanded over
    /// every error tag.
    pub kpis: Option<Vec<KpiEntry>>,
    pub cost: CostConfig,
}

impl EvaluationConfig {
    /// Load a configuration file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            EvalError::config(format!("failed to read config at {}: {e}", path.display()))
        })?;
        contents.parse()
    }

    /// Build the KPI table described by this configuration.
    pub fn kpi_table(&self, time_offset: f64) -> Result<Vec<Box<dyn Kpi>>> {
        let Some(entries) = &self.kpis else {
            return Ok(kpi::default_table(time_offset));
        };

        entries
            .iter()
            .map(|entry| {
                let kind: KpiKind = entry.func.parse()?;
                let tag = entry
                    .args
                    .as_deref()
                    .map(ErrorTag::from_str)
                    .transpose()?;
                kpi::create(kind, tag, time_offset)
            })
            .collect()
    }
}

impl FromStr for EvaluationConfig {
    type Err = EvalError;

    fn from_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| EvalError::config(format!("failed to parse config: {e}")))
    }
}

/// Serializable outcome of an evaluation.
#[derive(Debug, Serialize)]
pub struct EvaluationReport<'a> {
    pub source: &'a str,
    pub format: String,
    pub time_offset: f64,
    pub extraction: &'a ExtractionSummary,
    pub kpis: &'a BTreeMap<String, f64>,
    pub failures: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// KPI evaluation session over one recording.
#[derive(Debug)]
pub struct Evaluation {
    recording: Recording,
    time_offset: f64,
    table: Vec<Box<dyn Kpi>>,
    values: BTreeMap<String, f64>,
    failures: BTreeMap<String, String>,
    cost_terms: BTreeMap<String, f64>,
    constraints: Vec<Constraint>,
}

impl Evaluation {
    /// Open an archive and evaluate it.
    pub fn open<P: AsRef<Path>>(path: P, config: &EvaluationConfig) -> Result<Self> {
        info!(context = "Evaluation", path = %path.as_ref().display(), "Opening recording");
        Self::new(Recording::open(path)?, config)
    }

    /// Evaluate a recording. A negative time offset is replaced by zero.
    pub fn new(recording: Recording, config: &EvaluationConfig) -> Result<Self> {
        let time_offset = if config.time_offset >= 0.0 {
            config.time_offset
        } else {
            warn!(
                context = "Evaluation",
                time_offset = config.time_offset,
                "Invalid time offset, using zero"
            );
            0.0
        };
        info!(context = "Evaluation", time_offset, "Time offset for KPI evaluation");

        let mut table: Vec<Box<dyn Kpi>> = Vec::new();
        for kpi in config.kpi_table(time_offset)? {
            if table.iter().any(|k| k.full_tag() == kpi.full_tag()) {
                warn!(context = "Evaluation", kpi = %kpi.full_tag(), "Duplicate KPI ignored");
                continue;
            }
            table.push(kpi);
        }

        let mut evaluation = Self {
            recording,
            time_offset,
            table,
            values: BTreeMap::new(),
            failures: BTreeMap::new(),
            cost_terms: BTreeMap::new(),
            constraints: Vec::new(),
        };
        evaluation.compute_kpis();

        for (tag, weight) in &config.cost.weights {
            evaluation.add_cost_fcn_term(tag, *weight)?;
        }
        for entry in &config.cost.constraints {
            let constraint = Constraint::create(&entry.model, &entry.tag, &entry.input_tag)?
                .with_params(&entry.params)?;
            evaluation.add_constraint(constraint)?;
        }

        Ok(evaluation)
    }

    /// Compute every KPI of the table in parallel.
    fn compute_kpis(&mut self) {
        let recording = &self.recording;
        let results: Vec<(String, Result<f64>)> = self
            .table
            .par_iter()
            .map(|kpi| (kpi.full_tag(), kpi.evaluate(recording)))
            .collect();

        self.values.clear();
        self.failures.clear();
        for (tag, result) in results {
            match result {
                Ok(value) => {
                    debug!(context = "Evaluation", kpi = %tag, value, "KPI computed");
                    self.values.insert(tag, value);
                }
                Err(e) => {
                    warn!(context = "Evaluation", kpi = %tag, error = %e, "KPI failed");
                    self.failures.insert(tag, e.to_string());
                }
            }
        }
        info!(
            context = "Evaluation",
            computed = self.values.len(),
            failed = self.failures.len(),
            "KPI table computed"
        );
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }

    /// Tracking error samples of the recording.
    pub fn error_set(&self) -> Result<ErrorSet> {
        ErrorSet::from_recording(&self.recording)
    }

    /// Whether the table holds a KPI with this full tag.
    pub fn has_kpi(&self, tag: &str) -> bool {
        self.table.iter().any(|kpi| kpi.full_tag() == tag)
    }

    /// Successfully computed KPI values by full tag.
    pub fn kpis(&self) -> &BTreeMap<String, f64> {
        &self.values
    }

    pub fn kpi(&self, tag: &str) -> Option<f64> {
        self.values.get(tag).copied()
    }

    /// Failure reason per KPI that could not be computed.
    pub fn failures(&self) -> &BTreeMap<String, String> {
        &self.failures
    }

    /// Label per KPI full tag.
    pub fn labels(&self) -> BTreeMap<String, String> {
        self.table
            .iter()
            .map(|kpi| (kpi.full_tag(), kpi.label()))
            .collect()
    }

    /// Add a weighted KPI to the cost.
    ///
    /// The weight must be positive, the KPI must be in the table and each
    /// KPI can be added once.
    pub fn add_cost_fcn_term(&mut self, tag: &str, weight: f64) -> Result<()> {
        if weight <= 0.0 {
            return Err(EvalError::config(format!(
                "weight of '{tag}' must be positive, got {weight}"
            )));
        }
        if !self.has_kpi(tag) {
            return Err(EvalError::config(format!("invalid KPI tag '{tag}'")));
        }
        if self.cost_terms.contains_key(tag) {
            return Err(EvalError::config(format!(
                "KPI '{tag}' already added to the cost function"
            )));
        }
        info!(context = "Evaluation", kpi = %tag, weight, "Cost function term added");
        self.cost_terms.insert(tag.to_string(), weight);
        Ok(())
    }

    /// Add a constraint. Its input tag must be in the KPI table.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<()> {
        if !self.has_kpi(constraint.input_tag()) {
            return Err(EvalError::config(format!(
                "constraint '{}' reads unknown KPI '{}'",
                constraint.tag(),
                constraint.input_tag()
            )));
        }
        self.constraints.push(constraint);
        Ok(())
    }

    pub fn cost_terms(&self) -> &BTreeMap<String, f64> {
        &self.cost_terms
    }

    /// Cost function over the computed KPI values.
    pub fn cost_function(&self) -> CostFunction {
        let mut cost = CostFunction::from_weights(&self.cost_terms);
        for (tag, value) in &self.values {
            cost.add_kpi(tag.clone(), *value);
        }
        // weighted terms were registered at zero
        cost.set_kpis(&self.values);
        for constraint in &self.constraints {
            cost.add_constraint(constraint.clone());
        }
        cost
    }

    /// Evaluate the cost. Fails when a KPI it uses could not be computed.
    pub fn cost(&self) -> Result<f64> {
        let used = self
            .cost_terms
            .keys()
            .map(String::as_str)
            .chain(self.constraints.iter().map(Constraint::input_tag));
        for tag in used {
            if let Some(reason) = self.failures.get(tag) {
                return Err(EvalError::insufficient_data(format!(
                    "KPI '{tag}' used by the cost failed: {reason}"
                )));
            }
        }
        let cost = self.cost_function().compute()?;
        info!(context = "Evaluation", cost, "Cost computed");
        Ok(cost)
    }

    /// Summary of this evaluation. The cost is included when cost terms or
    /// constraints are set and every KPI they use was computed.
    pub fn report(&self) -> EvaluationReport<'_> {
        let cost = if self.cost_terms.is_empty() && self.constraints.is_empty() {
            None
        } else {
            self.cost().ok()
        };
        EvaluationReport {
            source: self.recording.source_path(),
            format: self.recording.format().to_string(),
            time_offset: self.time_offset,
            extraction: self.recording.summary(),
            kpis: &self.values,
            failures: &self.failures,
            cost,
        }
    }

    /// Write the KPI values and labels as JSON into `dir`.
    pub fn save_kpis<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(EvalError::config(format!(
                "invalid output directory {}",
                dir.display()
            )));
        }

        write_json(&dir.join(KPI_VALUES_FILE), &self.values)?;
        write_json(&dir.join(KPI_LABELS_FILE), &self.labels())?;
        if !self.failures.is_empty() {
            write_json(&dir.join(KPI_FAILURES_FILE), &self.failures)?;
        }
        info!(context = "Evaluation", dir = %dir.display(), "KPIs saved");
        Ok(())
    }

    pub fn format(&self) -> FileFormat {
        self.recording.format()
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| EvalError::config(format!("cannot serialize {}: {e}", path.display())))?;
    fs::write(path, json)?;
    Ok(())
}
