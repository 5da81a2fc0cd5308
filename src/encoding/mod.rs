// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Payload decoding for the consumed message types.
//!
//! - [`cursor`] - ROS1 / CDR wire cursor
//! - [`messages`] - Per message type decoders
//!
//! Message type names are compared in their normalized form, so the ROS2
//! spelling `nav_msgs/msg/Odometry` matches `nav_msgs/Odometry`.

pub mod cursor;
pub mod messages;

pub use cursor::{WireCursor, WireFormat};

use crate::core::{DecodedMessage, EvalError, Result};

/// `uuv_control_msgs/TrajectoryPoint`
pub const TRAJECTORY_POINT: &str = "uuv_control_msgs/TrajectoryPoint";
/// `nav_msgs/Odometry`
pub const ODOMETRY: &str = "nav_msgs/Odometry";
/// `geometry_msgs/WrenchStamped`
pub const WRENCH_STAMPED: &str = "geometry_msgs/WrenchStamped";
/// `geometry_msgs/TwistStamped`
pub const TWIST_STAMPED: &str = "geometry_msgs/TwistStamped";
/// `uuv_gazebo_ros_plugins_msgs/FloatStamped`
pub const FLOAT_STAMPED: &str = "uuv_gazebo_ros_plugins_msgs/FloatStamped";
/// `std_msgs/Float64`
pub const FLOAT64: &str = "std_msgs/Float64";

/// Normalize a message type name to the ROS1 `package/Type` spelling.
///
/// Strips the `/msg/` infix used by ROS2 and IDL-derived schema names.
pub fn normalize_type(message_type: &str) -> String {
    let trimmed = message_type.trim();
    let parts: Vec<&str> = trimmed.split('/').collect();
    match parts.as_slice() {
        [package, "msg", name] => format!("{package}/{name}"),
        _ => trimmed.to_string(),
    }
}

/// Check whether a recorded type name denotes `expected` (given normalized).
pub fn type_matches(message_type: &str, expected: &str) -> bool {
    normalize_type(message_type) == expected
}

/// Map a channel's message encoding to its wire format.
pub fn wire_format(encoding: &str) -> Result<WireFormat> {
    match encoding.to_lowercase().as_str() {
        "ros1" | "" => Ok(WireFormat::Ros1),
        "cdr" => Ok(WireFormat::Cdr),
        other => Err(EvalError::wire(
            "encoding",
            format!("unsupported message encoding '{other}'"),
        )),
    }
}

/// Decode one serialized message of the given type.
pub fn decode_message(message_type: &str, encoding: &str, data: &[u8]) -> Result<DecodedMessage> {
    let mut cursor = WireCursor::new(data, wire_format(encoding)?)?;
    let normalized = normalize_type(message_type);
    match normalized.as_str() {
        TRAJECTORY_POINT => messages::trajectory_point(&mut cursor),
        ODOMETRY => messages::odometry(&mut cursor),
        WRENCH_STAMPED => messages::wrench_stamped(&mut cursor),
        TWIST_STAMPED => messages::twist_stamped(&mut cursor),
        FLOAT_STAMPED => messages::float_stamped(&mut cursor),
        FLOAT64 => messages::float64(&mut cursor),
        _ => Err(EvalError::unsupported_type(message_type)),
    }
}
