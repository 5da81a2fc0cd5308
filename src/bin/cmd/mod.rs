// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod evaluate;
mod inspect;

pub use evaluate::EvaluateCmd;
pub use inspect::InspectCmd;
