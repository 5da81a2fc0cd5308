// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Archive format backends.
//!
//! - [`mcap`]: MCAP (ROS2-native) format support
//! - [`bag`]: ROS1 bag format support

pub mod bag;
pub mod mcap;

pub use self::bag::BagSource;
pub use self::mcap::McapSource;
