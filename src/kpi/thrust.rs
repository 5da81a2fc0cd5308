// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Actuator effort metrics over the pooled thruster outputs.

use crate::core::{EvalError, Result};
use crate::recording::Recording;

use super::{Kpi, KpiKind};

/// Absolute values of every thruster output sample, all indices pooled.
fn pooled_abs_thrust(recording: &Recording) -> Result<Vec<f64>> {
    let values: Vec<f64> = recording
        .thruster_outputs()
        .iter()
        .flat_map(|(_, series)| series.values().iter().map(|v| v.abs()))
        .collect();
    if values.is_empty() {
        return Err(EvalError::insufficient_data("no thruster output samples"));
    }
    Ok(values)
}

/// Maximum absolute thrust.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxAbsThrust;

impl Kpi for MaxAbsThrust {
    fn kind(&self) -> KpiKind {
        KpiKind::MaxAbsThrust
    }

    fn full_tag(&self) -> String {
        self.tag().to_string()
    }

    fn label(&self) -> String {
        "Max. abs. thrust [N]".to_string()
    }

    fn evaluate(&self, recording: &Recording) -> Result<f64> {
        Ok(pooled_abs_thrust(recording)?
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max))
    }
}

/// Mean absolute thrust.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAbsThrust;

impl Kpi for MeanAbsThrust {
    fn kind(&self) -> KpiKind {
        KpiKind::MeanAbsThrust
    }

    fn full_tag(&self) -> String {
        self.tag().to_string()
    }

    fn label(&self) -> String {
        "Mean abs. thrust [N]".to_string()
    }

    fn evaluate(&self, recording: &Recording) -> Result<f64> {
        let values = pooled_abs_thrust(recording)?;
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }
}
