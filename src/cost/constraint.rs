// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Constraint models added on top of the weighted KPI sum.
//!
//! With `d = gain * (x - offset)`:
//!
//! - `LogBarrierMethod`: `0` when `x > offset`, else `-c * ln(-d)`.
//! - `InverseBarrierMethod`: `-c / d`, with `|d|` kept at or above `1e-5`.
//! - `PenaltyFunction`: `0` when `x < offset`, else `c * max(0, d)^n`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{EvalError, Result};

/// Smallest magnitude of the inverse barrier denominator.
const INVERSE_BARRIER_EPS: f64 = 1e-5;

/// Constraint model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintModel {
    LogBarrierMethod,
    InverseBarrierMethod,
    PenaltyFunction,
}

impl ConstraintModel {
    pub const ALL: [ConstraintModel; 3] = [
        ConstraintModel::LogBarrierMethod,
        ConstraintModel::InverseBarrierMethod,
        ConstraintModel::PenaltyFunction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintModel::LogBarrierMethod => "LogBarrierMethod",
            ConstraintModel::InverseBarrierMethod => "InverseBarrierMethod",
            ConstraintModel::PenaltyFunction => "PenaltyFunction",
        }
    }

    fn accepts(&self, param: &str) -> bool {
        match param {
            "c" | "gain" | "offset" => true,
            "n" => *self == ConstraintModel::PenaltyFunction,
            _ => false,
        }
    }
}

impl fmt::Display for ConstraintModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintModel {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        ConstraintModel::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| EvalError::config(format!("invalid constraint model '{s}'")))
    }
}

/// Constraint parameters. All default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ConstraintParams {
    pub c: f64,
    pub gain: f64,
    pub offset: f64,
    /// Penalty exponent, only used by [`ConstraintModel::PenaltyFunction`].
    pub n: f64,
}

/// A constraint applied to the value of one KPI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    model: ConstraintModel,
    tag: String,
    input_tag: String,
    params: ConstraintParams,
}

impl Constraint {
    pub fn new(model: ConstraintModel, tag: impl Into<String>, input_tag: impl Into<String>) -> Self {
        Self {
            model,
            tag: tag.into(),
            input_tag: input_tag.into(),
            params: ConstraintParams::default(),
        }
    }

    /// Create a constraint from its model name.
    pub fn create(model: &str, tag: impl Into<String>, input_tag: impl Into<String>) -> Result<Self> {
        Ok(Self::new(model.parse()?, tag, input_tag))
    }

    /// Set parameters by name. Unknown names are rejected and leave the
    /// constraint unchanged.
    pub fn set_params(&mut self, params: &BTreeMap<String, f64>) -> Result<()> {
        if let Some(name) = params.keys().find(|name| !self.model.accepts(name)) {
            return Err(EvalError::config(format!(
                "invalid parameter '{name}' for constraint model {}",
                self.model
            )));
        }
        for (name, value) in params {
            match name.as_str() {
                "c" => self.params.c = *value,
                "gain" => self.params.gain = *value,
                "offset" => self.params.offset = *value,
                _ => self.params.n = *value,
            }
        }
        Ok(())
    }

    pub fn with_params(mut self, params: &BTreeMap<String, f64>) -> Result<Self> {
        self.set_params(params)?;
        Ok(self)
    }

    pub fn model(&self) -> ConstraintModel {
        self.model
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Full tag of the KPI this constraint reads.
    pub fn input_tag(&self) -> &str {
        &self.input_tag
    }

    pub fn params(&self) -> &ConstraintParams {
        &self.params
    }

    /// Evaluate the constraint at `x`.
    pub fn compute(&self, x: f64) -> f64 {
        let ConstraintParams { c, gain, offset, n } = self.params;
        match self.model {
            ConstraintModel::LogBarrierMethod => {
                if x - offset > 0.0 {
                    0.0
                } else {
                    -c * (-gain * (x - offset)).ln()
                }
            }
            ConstraintModel::InverseBarrierMethod => {
                let mut d = gain * (x - offset);
                if d.abs() < INVERSE_BARRIER_EPS {
                    d = if d < 0.0 {
                        -INVERSE_BARRIER_EPS
                    } else {
                        INVERSE_BARRIER_EPS
                    };
                }
                -c / d
            }
            ConstraintModel::PenaltyFunction => {
                if x - offset < 0.0 {
                    0.0
                } else {
                    c * (gain * (x - offset)).max(0.0).powf(n)
                }
            }
        }
    }
}
