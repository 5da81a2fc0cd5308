// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Scalar cost over KPI values.
//!
//! `cost = sum(weight[tag] * kpi[tag]) + sum(constraint(kpi[input_tag]))`

mod constraint;

pub use constraint::{Constraint, ConstraintModel, ConstraintParams};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::core::{EvalError, Result};

/// File written by [`CostFunction::save`].
pub const COST_FUNCTION_FILE: &str = "cost_function.json";

/// Weighted KPI sum with optional constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostFunction {
    weights: BTreeMap<String, f64>,
    kpis: BTreeMap<String, f64>,
    constraints: Vec<Constraint>,
}

impl CostFunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// One term per weight; every KPI value starts at zero.
    pub fn from_weights(weights: &BTreeMap<String, f64>) -> Self {
        let mut cost = Self::new();
        for (tag, weight) in weights {
            cost.kpis.insert(tag.clone(), 0.0);
            cost.weights.insert(tag.clone(), *weight);
        }
        cost
    }

    pub fn is_kpi(&self, tag: &str) -> bool {
        self.kpis.contains_key(tag)
    }

    pub fn kpis(&self) -> &BTreeMap<String, f64> {
        &self.kpis
    }

    pub fn kpi(&self, tag: &str) -> Option<f64> {
        self.kpis.get(tag).copied()
    }

    pub fn weights(&self) -> &BTreeMap<String, f64> {
        &self.weights
    }

    pub fn weight(&self, tag: &str) -> Option<f64> {
        self.weights.get(tag).copied()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Register a KPI. Returns false when the tag already exists.
    pub fn add_kpi(&mut self, tag: impl Into<String>, value: f64) -> bool {
        let tag = tag.into();
        if self.kpis.contains_key(&tag) {
            return false;
        }
        self.kpis.insert(tag, value);
        true
    }

    pub fn set_kpi(&mut self, tag: &str, value: f64) -> Result<()> {
        let slot = self
            .kpis
            .get_mut(tag)
            .ok_or_else(|| EvalError::config(format!("unknown KPI tag '{tag}'")))?;
        *slot = value;
        Ok(())
    }

    pub fn set_weight(&mut self, tag: &str, weight: f64) -> Result<()> {
        if !self.is_kpi(tag) {
            return Err(EvalError::config(format!("unknown KPI tag '{tag}'")));
        }
        self.weights.insert(tag.to_string(), weight);
        Ok(())
    }

    /// Update the values of known KPIs; unknown tags are skipped.
    pub fn set_kpis(&mut self, values: &BTreeMap<String, f64>) {
        for (tag, value) in values {
            match self.kpis.get_mut(tag) {
                Some(slot) => *slot = *value,
                None => debug!(context = "CostFunction", tag = %tag, "Skipping unknown KPI tag"),
            }
        }
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        info!(
            context = "CostFunction",
            model = %constraint.model(),
            tag = %constraint.tag(),
            input_tag = %constraint.input_tag(),
            "Constraint added"
        );
        self.constraints.push(constraint);
    }

    /// Evaluate the cost.
    ///
    /// Fails when a weight or a constraint refers to a KPI without a value.
    pub fn compute(&self) -> Result<f64> {
        let mut cost = 0.0;
        for (tag, weight) in &self.weights {
            cost += weight * self.value_of(tag)?;
        }
        debug!(context = "CostFunction", cost, "Weighted KPI sum");

        for constraint in &self.constraints {
            let term = constraint.compute(self.value_of(constraint.input_tag())?);
            debug!(
                context = "CostFunction",
                model = %constraint.model(),
                tag = %constraint.tag(),
                value = term,
                "Constraint term"
            );
            cost += term;
        }
        Ok(cost)
    }

    fn value_of(&self, tag: &str) -> Result<f64> {
        self.kpi(tag)
            .ok_or_else(|| EvalError::config(format!("no value for KPI tag '{tag}'")))
    }

    /// Write weights and constraints to `cost_function.json` in `dir`.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(EvalError::config(format!(
                "invalid output directory {}",
                dir.display()
            )));
        }

        #[derive(Serialize)]
        struct Saved<'a> {
            weights: &'a BTreeMap<String, f64>,
            constraints: &'a [Constraint],
        }

        let json = serde_json::to_string_pretty(&Saved {
            weights: &self.weights,
            constraints: &self.constraints,
        })
        .map_err(|e| EvalError::config(format!("cannot serialize cost function: {e}")))?;
        fs::write(dir.join(COST_FUNCTION_FILE), json)?;
        Ok(())
    }
}
