// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Key performance indicators.
//!
//! A [`Kpi`] reduces a [`Recording`] to one scalar. Metrics are pure: they
//! read the recording and never modify it, so a table of metrics can be
//! evaluated in parallel over one shared recording.
//!
//! | Tag | Target | Value |
//! |---|---|---|
//! | `max_abs_thrust` | thrusters | max \|u\| over all thruster outputs |
//! | `mean_abs_thrust` | thrusters | mean \|u\| over all thruster outputs |
//! | `rmse` | error | sqrt(mean(m^2)) of the error magnitudes |
//! | `max_error` | error | max of the error magnitudes |
//! | `mae` | error | mean of the error magnitudes |
//! | `euclidean_error` | error | norm of the mean error vector |
//!
//! Error metrics are parameterized by an [`ErrorTag`]; their full tag joins
//! both, e.g. `rmse_position`.

mod thrust;
mod tracking;

pub use thrust::{MaxAbsThrust, MeanAbsThrust};
pub use tracking::{EuclideanError, MaxError, MeanAbsoluteError, RmsError};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{EvalError, Result};
use crate::recording::Recording;
use crate::tracking::ErrorTag;

/// Data a KPI is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiTarget {
    Thrusters,
    Error,
}

/// Available KPI kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiKind {
    MaxAbsThrust,
    MeanAbsThrust,
    Rmse,
    MaxError,
    Mae,
    EuclideanError,
}

impl KpiKind {
    pub const ALL: [KpiKind; 6] = [
        KpiKind::MaxAbsThrust,
        KpiKind::MeanAbsThrust,
        KpiKind::Rmse,
        KpiKind::MaxError,
        KpiKind::Mae,
        KpiKind::EuclideanError,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            KpiKind::MaxAbsThrust => "max_abs_thrust",
            KpiKind::MeanAbsThrust => "mean_abs_thrust",
            KpiKind::Rmse => "rmse",
            KpiKind::MaxError => "max_error",
            KpiKind::Mae => "mae",
            KpiKind::EuclideanError => "euclidean_error",
        }
    }

    pub fn target(&self) -> KpiTarget {
        match self {
            KpiKind::MaxAbsThrust | KpiKind::MeanAbsThrust => KpiTarget::Thrusters,
            _ => KpiTarget::Error,
        }
    }
}

impl fmt::Display for KpiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for KpiKind {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        KpiKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| EvalError::config(format!("unknown KPI '{s}'")))
    }
}

/// Scalar metric over a recording.
pub trait Kpi: Send + Sync + fmt::Debug {
    fn kind(&self) -> KpiKind;

    /// Short tag of the metric kind, e.g. `rmse`.
    fn tag(&self) -> &'static str {
        self.kind().tag()
    }

    /// Unique tag including the error component, e.g. `rmse_yaw`.
    fn full_tag(&self) -> String;

    /// Human readable label.
    fn label(&self) -> String;

    /// Compute the metric. Missing input data fails with
    /// [`EvalError::InsufficientData`].
    fn evaluate(&self, recording: &Recording) -> Result<f64>;
}

/// Create a KPI.
///
/// `error_tag` selects the error component of error metrics and defaults to
/// [`ErrorTag::Position`]; thruster metrics reject it. `time_offset` (seconds)
/// drops error samples stamped before it.
pub fn create(kind: KpiKind, error_tag: Option<ErrorTag>, time_offset: f64) -> Result<Box<dyn Kpi>> {
    if kind.target() == KpiTarget::Thrusters {
        if let Some(tag) = error_tag {
            return Err(EvalError::config(format!(
                "KPI '{kind}' takes no error tag, got '{tag}'"
            )));
        }
    }

    let tag = error_tag.unwrap_or(ErrorTag::Position);
    let kpi: Box<dyn Kpi> = match kind {
        KpiKind::MaxAbsThrust => Box::new(MaxAbsThrust),
        KpiKind::MeanAbsThrust => Box::new(MeanAbsThrust),
        KpiKind::Rmse => Box::new(RmsError::new(tag).with_time_offset(time_offset)),
        KpiKind::MaxError => Box::new(MaxError::new(tag).with_time_offset(time_offset)),
        KpiKind::Mae => Box::new(MeanAbsoluteError::new(tag).with_time_offset(time_offset)),
        KpiKind::EuclideanError => Box::new(EuclideanError::new(tag).with_time_offset(time_offset)),
    };
    Ok(kpi)
}

/// Every KPI kind, with error metrics expanded over every error tag.
pub fn default_table(time_offset: f64) -> Vec<Box<dyn Kpi>> {
    let mut table: Vec<Box<dyn Kpi>> = Vec::new();
    for kind in KpiKind::ALL {
        match kind.target() {
            KpiTarget::Thrusters => {
                if let Ok(kpi) = create(kind, None, time_offset) {
                    table.push(kpi);
                }
            }
            KpiTarget::Error => {
                for tag in ErrorTag::ALL {
                    if let Ok(kpi) = create(kind, Some(tag), time_offset) {
                        table.push(kpi);
                    }
                }
            }
        }
    }
    table
}
