// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Recording extraction.
//!
//! A [`Recording`] is built once per archive: the catalogue is classified,
//! then every extraction pass runs in a fault boundary of its own. A failing
//! pass is logged, recorded in the [`ExtractionSummary`], and leaves its part
//! of the data model empty; the remaining passes are unaffected.
//!
//! # Example
//!
//! ```rust,no_run
//! use roboeval::Recording;
//!
//! let recording = Recording::open("run.bag")?;
//! if !recording.summary().is_complete() {
//!     eprintln!("failed passes: {:?}", recording.summary().failed_passes());
//! }
//! println!("{} thrusters", recording.n_thrusters());
//! # Ok::<(), roboeval::EvalError>(())
//! ```

mod passes;

pub use passes::{ExtractionSummary, Pass, PassOutcome};

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::classify::{classify, Role, RoleAssignment};
use crate::core::{EvalError, Result};
use crate::io::{open_source, ChannelInfo, FileFormat, RecordSource};
use crate::model::{Coords, IndexedSeries, ScalarSeries, Trajectory, VectorSeries, WrenchSeries};

use passes::Extracted;

/// Which held trajectory to project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrajectoryKind {
    Desired,
    Actual,
}

/// Extracted content of one recorded archive.
///
/// Immutable after construction; all accessors are read-only.
#[derive(Debug, Clone)]
pub struct Recording {
    source_path: String,
    format: FileFormat,
    catalogue: Vec<ChannelInfo>,
    assignment: RoleAssignment,

    desired: Trajectory,
    actual: Trajectory,
    error: Option<Trajectory>,

    thruster_output: IndexedSeries<ScalarSeries>,
    thruster_input: IndexedSeries<ScalarSeries>,
    thruster_manager_wrench: WrenchSeries,

    fin_input: IndexedSeries<ScalarSeries>,
    fin_output: IndexedSeries<ScalarSeries>,
    fin_wrench: IndexedSeries<WrenchSeries>,

    disturbance_wrench: WrenchSeries,
    ambient_current: VectorSeries,

    summary: ExtractionSummary,
    is_init: bool,
}

impl Recording {
    /// Open an archive and extract it.
    ///
    /// Fails with [`EvalError::ArchiveOpen`] when the archive cannot be
    /// opened. The archive is closed before this returns.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = open_source(path)?;
        Ok(Self::from_source(source.as_ref()))
    }

    /// Extract a recording from any record source.
    pub fn from_source(source: &dyn RecordSource) -> Self {
        info!(
            context = "Recording",
            path = %source.path(),
            format = %source.format(),
            channels = source.channels().len(),
            "Extracting recording"
        );

        let assignment = classify(source.channels());
        if !assignment.contains(Role::ReferenceTrajectory) {
            warn!(
                context = "Recording",
                path = %source.path(),
                "No reference trajectory channel found"
            );
        }

        let mut summary = ExtractionSummary::default();
        let roles = &assignment;

        let desired = run_pass(&mut summary, Pass::DesiredTrajectory, || {
            passes::desired_trajectory(source, roles)
        });
        let actual = run_pass(&mut summary, Pass::ActualOdometry, || {
            passes::actual_odometry(source, roles)
        });
        let error = run_pass(&mut summary, Pass::TrackingError, || {
            passes::tracking_error(source, roles)
        });
        let thruster_output = run_pass(&mut summary, Pass::ThrusterOutput, || {
            passes::scalar_family(source, roles.thruster_prefix(), "thrust")
        });
        let thruster_input = run_pass(&mut summary, Pass::ThrusterInput, || {
            passes::scalar_family(source, roles.thruster_prefix(), "input")
        });
        let fin_input = run_pass(&mut summary, Pass::FinInput, || {
            passes::scalar_family(source, roles.fin_prefix(), "input")
        });
        let fin_output = run_pass(&mut summary, Pass::FinOutput, || {
            passes::scalar_family(source, roles.fin_prefix(), "output")
        });
        let fin_wrench = run_pass(&mut summary, Pass::FinWrench, || {
            passes::wrench_family(source, roles.fin_prefix(), "wrench_topic")
        });
        let disturbance_wrench = run_pass(&mut summary, Pass::DisturbanceWrench, || {
            passes::singleton_wrench(source, roles, Role::DisturbanceWrench)
        });
        let ambient_current = run_pass(&mut summary, Pass::AmbientCurrent, || {
            passes::ambient_current(source, roles)
        });
        let thruster_manager_wrench = run_pass(&mut summary, Pass::ActuatorManagerWrench, || {
            passes::singleton_wrench(source, roles, Role::ActuatorManagerWrench)
        });

        if summary.is_complete() {
            info!(
                context = "Recording",
                records = summary.record_count(),
                "Extraction finished"
            );
        } else {
            warn!(
                context = "Recording",
                records = summary.record_count(),
                failed = ?summary.failed_passes(),
                "Extraction finished with failed passes"
            );
        }

        Self {
            source_path: source.path().to_string(),
            format: source.format(),
            catalogue: source.channels().to_vec(),
            assignment,
            desired,
            actual,
            error,
            thruster_output,
            thruster_input,
            thruster_manager_wrench,
            fin_input,
            fin_output,
            fin_wrench,
            disturbance_wrench,
            ambient_current,
            summary,
            is_init: true,
        }
    }

    /// True once the extraction loop has completed.
    ///
    /// This does not imply that every pass succeeded; see [`Recording::summary`].
    pub fn is_init(&self) -> bool {
        self.is_init
    }

    /// Per-pass extraction outcomes.
    pub fn summary(&self) -> &ExtractionSummary {
        &self.summary
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Channel catalogue of the archive.
    pub fn catalogue(&self) -> &[ChannelInfo] {
        &self.catalogue
    }

    pub fn assignment(&self) -> &RoleAssignment {
        &self.assignment
    }

    /// Time base of the actual trajectory.
    pub fn time(&self) -> Vec<f64> {
        self.actual.times()
    }

    pub fn desired(&self) -> &Trajectory {
        &self.desired
    }

    pub fn actual(&self) -> &Trajectory {
        &self.actual
    }

    /// Recorded tracking-error trajectory, if the archive has one.
    pub fn errors(&self) -> Option<&Trajectory> {
        self.error.as_ref()
    }

    pub fn trajectory_coords(&self, kind: TrajectoryKind) -> Coords {
        match kind {
            TrajectoryKind::Desired => self.desired.coords(),
            TrajectoryKind::Actual => self.actual.coords(),
        }
    }

    /// First time stamp of the desired trajectory.
    pub fn start_time(&self) -> Result<f64> {
        self.desired
            .first()
            .map(|p| p.t)
            .ok_or(EvalError::EmptyTrajectory)
    }

    /// Last time stamp of the desired trajectory.
    pub fn end_time(&self) -> Result<f64> {
        self.desired
            .last()
            .map(|p| p.t)
            .ok_or(EvalError::EmptyTrajectory)
    }

    pub fn thruster_output(&self, index: usize) -> Result<&ScalarSeries> {
        lookup(&self.thruster_output, "thruster output", index)
    }

    pub fn thruster_input(&self, index: usize) -> Result<&ScalarSeries> {
        lookup(&self.thruster_input, "thruster input", index)
    }

    /// All thruster outputs keyed by index.
    pub fn thruster_outputs(&self) -> &IndexedSeries<ScalarSeries> {
        &self.thruster_output
    }

    pub fn thruster_inputs(&self) -> &IndexedSeries<ScalarSeries> {
        &self.thruster_input
    }

    /// Input wrench of the thruster manager.
    pub fn thruster_manager_wrench(&self) -> &WrenchSeries {
        &self.thruster_manager_wrench
    }

    pub fn fin_input(&self, index: usize) -> Result<&ScalarSeries> {
        lookup(&self.fin_input, "fin input", index)
    }

    pub fn fin_output(&self, index: usize) -> Result<&ScalarSeries> {
        lookup(&self.fin_output, "fin output", index)
    }

    pub fn fin_wrench(&self, index: usize) -> Result<&WrenchSeries> {
        lookup(&self.fin_wrench, "fin wrench", index)
    }

    pub fn disturbance_wrench(&self) -> &WrenchSeries {
        &self.disturbance_wrench
    }

    /// Ambient current velocity.
    pub fn ambient_current(&self) -> &VectorSeries {
        &self.ambient_current
    }

    /// Number of thrusters with output data.
    pub fn n_thrusters(&self) -> usize {
        self.thruster_output.len()
    }

    /// Number of distinct fin indices with input, output or wrench data.
    pub fn n_fins(&self) -> usize {
        self.fin_input
            .indices()
            .chain(self.fin_output.indices())
            .chain(self.fin_wrench.indices())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

fn lookup<'a, S>(family: &'a IndexedSeries<S>, name: &'static str, index: usize) -> Result<&'a S> {
    family
        .get(index)
        .ok_or(EvalError::InvalidIndex { family: name, index })
}

/// Run one pass inside its fault boundary.
fn run_pass<T: Default>(
    summary: &mut ExtractionSummary,
    pass: Pass,
    extract: impl FnOnce() -> Result<Extracted<T>>,
) -> T {
    match extract() {
        Ok(Some((value, records))) => {
            debug!(context = "Recording", pass = %pass, records, "Pass extracted");
            summary.record(pass, PassOutcome::Extracted { records });
            value
        }
        Ok(None) => {
            debug!(context = "Recording", pass = %pass, "Pass skipped, role absent");
            summary.record(pass, PassOutcome::Absent);
            T::default()
        }
        Err(e) => {
            error!(
                context = "Recording",
                pass = %pass,
                error = %e,
                details = ?e.log_fields(),
                "Extraction pass failed, discarding its data"
            );
            summary.record(
                pass,
                PassOutcome::Failed {
                    reason: e.to_string(),
                },
            );
            T::default()
        }
    }
}
