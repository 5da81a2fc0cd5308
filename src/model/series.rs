// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Time series containers.
//!
//! Every series stores its time base next to its values. Samples are only
//! added through `push`, which keeps the arrays parallel.

use std::collections::BTreeMap;

use serde::Serialize;

/// Scalar time series (thruster or fin signal).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScalarSeries {
    time: Vec<f64>,
    values: Vec<f64>,
}

impl ScalarSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample.
    pub fn push(&mut self, t: f64, value: f64) {
        self.time.push(t);
        self.values.push(value);
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// 3-vector time series (ambient current velocity).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VectorSeries {
    time: Vec<f64>,
    values: Vec<[f64; 3]>,
}

impl VectorSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample.
    pub fn push(&mut self, t: f64, value: [f64; 3]) {
        self.time.push(t);
        self.values.push(value);
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn values(&self) -> &[[f64; 3]] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Force and torque time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WrenchSeries {
    time: Vec<f64>,
    force: Vec<[f64; 3]>,
    torque: Vec<[f64; 3]>,
}

impl WrenchSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample.
    pub fn push(&mut self, t: f64, force: [f64; 3], torque: [f64; 3]) {
        self.time.push(t);
        self.force.push(force);
        self.torque.push(torque);
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn force(&self) -> &[[f64; 3]] {
        &self.force
    }

    pub fn torque(&self) -> &[[f64; 3]] {
        &self.torque
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Series keyed by actuator index, iterated in index order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedSeries<S> {
    entries: BTreeMap<usize, S>,
}

impl<S> Default for IndexedSeries<S> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<S> IndexedSeries<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the series of one index, replacing any previous entry.
    pub fn insert(&mut self, index: usize, series: S) {
        self.entries.insert(index, series);
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.entries.get(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Populated indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &S)> {
        self.entries.iter().map(|(i, s)| (*i, s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
