// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Extraction passes and their outcomes.
//!
//! A pass reads the channel (or channel family) of one role and fills one
//! part of the data model. Passes return `Ok(None)` when their role was not
//! discovered, so the caller can tell "absent" from "empty".

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::classify::{indexed_channel, Role, RoleAssignment, MAX_ACTUATORS};
use crate::core::{EvalError, Result};
use crate::io::{Record, RecordSource};
use crate::model::{IndexedSeries, ScalarSeries, Trajectory, VectorSeries, WrenchSeries};
use crate::records;

/// Extraction pass identifier, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    DesiredTrajectory,
    ActualOdometry,
    TrackingError,
    ThrusterOutput,
    ThrusterInput,
    FinInput,
    FinOutput,
    FinWrench,
    DisturbanceWrench,
    AmbientCurrent,
    ActuatorManagerWrench,
}

impl Pass {
    /// All passes in execution order.
    pub const ALL: [Pass; 11] = [
        Pass::DesiredTrajectory,
        Pass::ActualOdometry,
        Pass::TrackingError,
        Pass::ThrusterOutput,
        Pass::ThrusterInput,
        Pass::FinInput,
        Pass::FinOutput,
        Pass::FinWrench,
        Pass::DisturbanceWrench,
        Pass::AmbientCurrent,
        Pass::ActuatorManagerWrench,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pass::DesiredTrajectory => "desired_trajectory",
            Pass::ActualOdometry => "actual_odometry",
            Pass::TrackingError => "tracking_error",
            Pass::ThrusterOutput => "thruster_output",
            Pass::ThrusterInput => "thruster_input",
            Pass::FinInput => "fin_input",
            Pass::FinOutput => "fin_output",
            Pass::FinWrench => "fin_wrench",
            Pass::DisturbanceWrench => "disturbance_wrench",
            Pass::AmbientCurrent => "ambient_current",
            Pass::ActuatorManagerWrench => "actuator_manager_wrench",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one extraction pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PassOutcome {
    /// The pass read its channels; `records` may be zero.
    Extracted { records: usize },
    /// The role was not discovered in the catalogue.
    Absent,
    /// The pass failed and its output was left empty.
    Failed { reason: String },
}

impl PassOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, PassOutcome::Failed { .. })
    }
}

/// Per-pass outcomes of one extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionSummary {
    outcomes: BTreeMap<Pass, PassOutcome>,
}

impl ExtractionSummary {
    pub(crate) fn record(&mut self, pass: Pass, outcome: PassOutcome) {
        self.outcomes.insert(pass, outcome);
    }

    /// Outcome of a pass, if it ran.
    pub fn outcome(&self, pass: Pass) -> Option<&PassOutcome> {
        self.outcomes.get(&pass)
    }

    /// True when no pass failed. Absent roles do not count as failures.
    pub fn is_complete(&self) -> bool {
        !self.outcomes.values().any(PassOutcome::is_failed)
    }

    /// Passes that failed, in execution order.
    pub fn failed_passes(&self) -> Vec<Pass> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_failed())
            .map(|(pass, _)| *pass)
            .collect()
    }

    /// Total number of extracted records.
    pub fn record_count(&self) -> usize {
        self.outcomes
            .values()
            .map(|outcome| match outcome {
                PassOutcome::Extracted { records } => *records,
                _ => 0,
            })
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pass, &PassOutcome)> {
        self.outcomes.iter().map(|(p, o)| (*p, o))
    }
}

/// Output of a pass together with the number of records it consumed.
pub(crate) type Extracted<T> = Option<(T, usize)>;

/// Read and decode every record of a topic. Any failure becomes a
/// [`EvalError::ChannelDecode`] for that topic.
fn decode_channel<T>(
    source: &dyn RecordSource,
    topic: &str,
    decode: fn(&Record) -> Result<T>,
) -> Result<Vec<T>> {
    let records = source.read(topic).map_err(|e| match e {
        EvalError::ChannelDecode { .. } => e,
        other => EvalError::channel_decode(topic, other.to_string()),
    })?;

    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            decode(record).map_err(|e| EvalError::channel_decode(topic, format!("record {i}: {e}")))
        })
        .collect()
}

fn trajectory_from(
    source: &dyn RecordSource,
    topic: &str,
    decode: fn(&Record) -> Result<crate::model::TrajectoryPoint>,
) -> Result<(Trajectory, usize)> {
    let points = decode_channel(source, topic, decode)?;
    let count = points.len();
    let mut trajectory = Trajectory::new();
    for point in points {
        trajectory.push(point);
    }
    Ok((trajectory, count))
}

pub(crate) fn desired_trajectory(
    source: &dyn RecordSource,
    roles: &RoleAssignment,
) -> Result<Extracted<Trajectory>> {
    roles
        .get(Role::ReferenceTrajectory)
        .map(|topic| trajectory_from(source, topic, records::trajectory_point))
        .transpose()
}

pub(crate) fn actual_odometry(
    source: &dyn RecordSource,
    roles: &RoleAssignment,
) -> Result<Extracted<Trajectory>> {
    roles
        .get(Role::AchievedOdometry)
        .map(|topic| trajectory_from(source, topic, records::odometry_point))
        .transpose()
}

pub(crate) fn tracking_error(
    source: &dyn RecordSource,
    roles: &RoleAssignment,
) -> Result<Extracted<Option<Trajectory>>> {
    Ok(roles
        .get(Role::TrackingError)
        .map(|topic| trajectory_from(source, topic, records::trajectory_point))
        .transpose()?
        .map(|(trajectory, count)| (Some(trajectory), count)))
}

fn wrench_series(source: &dyn RecordSource, topic: &str) -> Result<(WrenchSeries, usize)> {
    let samples = decode_channel(source, topic, records::wrench_sample)?;
    let mut series = WrenchSeries::new();
    for s in &samples {
        series.push(s.t, s.force, s.torque);
    }
    Ok((series, samples.len()))
}

pub(crate) fn singleton_wrench(
    source: &dyn RecordSource,
    roles: &RoleAssignment,
    role: Role,
) -> Result<Extracted<WrenchSeries>> {
    roles
        .get(role)
        .map(|topic| wrench_series(source, topic))
        .transpose()
}

pub(crate) fn ambient_current(
    source: &dyn RecordSource,
    roles: &RoleAssignment,
) -> Result<Extracted<VectorSeries>> {
    let Some(topic) = roles.get(Role::AmbientCurrent) else {
        return Ok(None);
    };
    let samples = decode_channel(source, topic, records::linear_velocity_sample)?;
    let mut series = VectorSeries::new();
    for s in &samples {
        series.push(s.t, s.linear);
    }
    Ok(Some((series, samples.len())))
}

/// Probe `{prefix}/{i}/{suffix}` for every actuator index. Indices without
/// records produce no entry.
pub(crate) fn scalar_family(
    source: &dyn RecordSource,
    prefix: Option<&str>,
    suffix: &str,
) -> Result<Extracted<IndexedSeries<ScalarSeries>>> {
    let Some(prefix) = prefix else {
        return Ok(None);
    };

    let mut family = IndexedSeries::new();
    let mut count = 0;
    for index in 0..MAX_ACTUATORS {
        let topic = indexed_channel(prefix, index, suffix);
        let samples = decode_channel(source, &topic, records::scalar_sample)?;
        if samples.is_empty() {
            continue;
        }
        let mut series = ScalarSeries::new();
        for s in &samples {
            series.push(s.t, s.value);
        }
        count += samples.len();
        family.insert(index, series);
    }
    Ok(Some((family, count)))
}

/// Wrench counterpart of [`scalar_family`].
pub(crate) fn wrench_family(
    source: &dyn RecordSource,
    prefix: Option<&str>,
    suffix: &str,
) -> Result<Extracted<IndexedSeries<WrenchSeries>>> {
    let Some(prefix) = prefix else {
        return Ok(None);
    };

    let mut family = IndexedSeries::new();
    let mut count = 0;
    for index in 0..MAX_ACTUATORS {
        let topic = indexed_channel(prefix, index, suffix);
        let (series, n) = wrench_series(source, &topic)?;
        if n == 0 {
            continue;
        }
        count += n;
        family.insert(index, series);
    }
    Ok(Some((family, count)))
}
