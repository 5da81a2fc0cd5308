// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for recorded archives.
//!
//! This module provides the record source abstraction and its backends for
//! ROS1 bag, MCAP and in-memory data.

pub mod detection;
pub mod formats;
pub mod memory;
pub mod metadata;
pub mod reader;
pub mod traits;

// Re-exports
pub use detection::detect_format;
pub use formats::{BagSource, McapSource};
pub use memory::MemorySource;
pub use metadata::{ChannelInfo, FileFormat, Record};
pub use reader::open_source;
pub use traits::RecordSource;
