// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout roboeval.
//!
//! - [`EvalError`] - Error taxonomy for extraction and evaluation
//! - [`CodecValue`] - Decoded record field values
//! - [`FieldAccess`] - Dotted-path accessors over decoded messages

pub mod error;
pub mod value;

pub use error::{EvalError, Result};
pub use value::{message_of, struct_of, CodecValue, DecodedMessage, FieldAccess};
