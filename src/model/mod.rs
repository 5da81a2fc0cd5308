// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Time-indexed data model filled by extraction.

pub mod series;
pub mod trajectory;

pub use series::{IndexedSeries, ScalarSeries, VectorSeries, WrenchSeries};
pub use trajectory::{Coords, Trajectory, TrajectoryPoint};
