// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Roboeval
//!
//! Post-hoc performance evaluation of recorded underwater vehicle runs.
//!
//! The library opens a recorded archive (ROS1 bag or MCAP), discovers which
//! channels carry which data, extracts trajectories and actuator time series,
//! and reduces them to scalar key performance indicators:
//! - **Channel classification** in [`classify`]
//! - **Extraction** with per-pass fault isolation in [`recording`]
//! - **Tracking error** between desired and actual motion in [`tracking`]
//! - **KPIs** in [`kpi`], combined into a cost in [`cost`]
//! - **Evaluation sessions** with TOML configuration in [`evaluation`]
//!
//! ## Architecture
//!
//! - `io/` - Archive detection and record sources (bag, MCAP, in-memory)
//! - `encoding/` - Wire decoders for the supported message shapes
//! - `records` - Record to sample conversion
//! - `model/` - Trajectories and time series
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use roboeval::{Evaluation, EvaluationConfig};
//!
//! let config = EvaluationConfig::load_from_path("evaluation.toml")?;
//! let evaluation = Evaluation::open("run.bag", &config)?;
//! for (tag, value) in evaluation.kpis() {
//!     println!("{tag} = {value}");
//! }
//! println!("cost = {}", evaluation.cost()?);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{CodecValue, DecodedMessage, EvalError, Result};

// Wire decoding
pub mod encoding;

// Archive access
pub mod io;

pub use io::{open_source, ChannelInfo, FileFormat, MemorySource, Record, RecordSource};

// Data model
pub mod model;

pub use model::{IndexedSeries, ScalarSeries, Trajectory, TrajectoryPoint, VectorSeries, WrenchSeries};

pub mod classify;
pub mod records;
pub mod recording;

pub use classify::{classify, Role, RoleAssignment};
pub use recording::{ExtractionSummary, Pass, PassOutcome, Recording, TrajectoryKind};

pub mod tracking;

pub use tracking::{ErrorSet, ErrorTag, ErrorValue};

pub mod kpi;

pub use kpi::{Kpi, KpiKind};

pub mod cost;

pub use cost::{Constraint, ConstraintModel, CostFunction};

pub mod evaluation;

pub use evaluation::{Evaluation, EvaluationConfig};
