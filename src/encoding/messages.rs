// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoders for the message types consumed by the extraction passes.
//!
//! Each decoder mirrors the field order of the ROS message definition and
//! emits a [`DecodedMessage`] with the same field names, so downstream code
//! addresses fields exactly as they appear in the `.msg` files.

use crate::core::{struct_of, CodecValue, DecodedMessage, Result};

use super::cursor::{WireCursor, WireFormat};

/// `std_msgs/Header`. ROS1 carries a sequence number, ROS2 does not.
fn header(cursor: &mut WireCursor<'_>) -> Result<CodecValue> {
    let mut fields = DecodedMessage::new();
    let stamp = match cursor.format() {
        WireFormat::Ros1 => {
            fields.insert("seq".to_string(), CodecValue::UInt32(cursor.read_u32()?));
            let secs = cursor.read_u32()?;
            let nsecs = cursor.read_u32()?;
            CodecValue::from_ros1_time(secs, nsecs)
        }
        WireFormat::Cdr => {
            let sec = cursor.read_i32()?;
            let nanosec = cursor.read_u32()?;
            CodecValue::from_ros2_time(sec, nanosec)
        }
    };
    fields.insert("stamp".to_string(), stamp);
    fields.insert(
        "frame_id".to_string(),
        CodecValue::String(cursor.read_string()?),
    );
    Ok(CodecValue::Struct(fields))
}

fn vector3(cursor: &mut WireCursor<'_>) -> Result<CodecValue> {
    Ok(CodecValue::vector3(cursor.read_f64_array::<3>()?))
}

fn quaternion(cursor: &mut WireCursor<'_>) -> Result<CodecValue> {
    Ok(CodecValue::quaternion(cursor.read_f64_array::<4>()?))
}

fn covariance(cursor: &mut WireCursor<'_>) -> Result<CodecValue> {
    let values = cursor.read_f64_array::<36>()?;
    Ok(CodecValue::Array(
        values.into_iter().map(CodecValue::Float64).collect(),
    ))
}

/// `geometry_msgs/Pose`
fn pose(cursor: &mut WireCursor<'_>) -> Result<CodecValue> {
    let position = vector3(cursor)?;
    let orientation = quaternion(cursor)?;
    Ok(struct_of([("position", position), ("orientation", orientation)]))
}

/// `geometry_msgs/Twist` and `geometry_msgs/Accel` share a layout.
fn linear_angular(cursor: &mut WireCursor<'_>) -> Result<CodecValue> {
    let linear = vector3(cursor)?;
    let angular = vector3(cursor)?;
    Ok(struct_of([("linear", linear), ("angular", angular)]))
}

/// `geometry_msgs/Wrench`
fn wrench(cursor: &mut WireCursor<'_>) -> Result<CodecValue> {
    let force = vector3(cursor)?;
    let torque = vector3(cursor)?;
    Ok(struct_of([("force", force), ("torque", torque)]))
}

/// `uuv_control_msgs/TrajectoryPoint`
pub fn trajectory_point(cursor: &mut WireCursor<'_>) -> Result<DecodedMessage> {
    let mut msg = DecodedMessage::new();
    msg.insert("header".to_string(), header(cursor)?);
    msg.insert("pose".to_string(), pose(cursor)?);
    msg.insert("velocity".to_string(), linear_angular(cursor)?);
    msg.insert("acceleration".to_string(), linear_angular(cursor)?);
    Ok(msg)
}

/// `nav_msgs/Odometry`
pub fn odometry(cursor: &mut WireCursor<'_>) -> Result<DecodedMessage> {
    let mut msg = DecodedMessage::new();
    msg.insert("header".to_string(), header(cursor)?);
    msg.insert(
        "child_frame_id".to_string(),
        CodecValue::String(cursor.read_string()?),
    );
    let pose_value = pose(cursor)?;
    let pose_cov = covariance(cursor)?;
    msg.insert(
        "pose".to_string(),
        struct_of([("pose", pose_value), ("covariance", pose_cov)]),
    );
    let twist_value = linear_angular(cursor)?;
    let twist_cov = covariance(cursor)?;
    msg.insert(
        "twist".to_string(),
        struct_of([("twist", twist_value), ("covariance", twist_cov)]),
    );
    Ok(msg)
}

/// `geometry_msgs/WrenchStamped`
pub fn wrench_stamped(cursor: &mut WireCursor<'_>) -> Result<DecodedMessage> {
    let mut msg = DecodedMessage::new();
    msg.insert("header".to_string(), header(cursor)?);
    msg.insert("wrench".to_string(), wrench(cursor)?);
    Ok(msg)
}

/// `geometry_msgs/TwistStamped`
pub fn twist_stamped(cursor: &mut WireCursor<'_>) -> Result<DecodedMessage> {
    let mut msg = DecodedMessage::new();
    msg.insert("header".to_string(), header(cursor)?);
    msg.insert("twist".to_string(), linear_angular(cursor)?);
    Ok(msg)
}

/// `uuv_gazebo_ros_plugins_msgs/FloatStamped`
pub fn float_stamped(cursor: &mut WireCursor<'_>) -> Result<DecodedMessage> {
    let mut msg = DecodedMessage::new();
    msg.insert("header".to_string(), header(cursor)?);
    msg.insert("data".to_string(), CodecValue::Float64(cursor.read_f64()?));
    Ok(msg)
}

/// `std_msgs/Float64`
pub fn float64(cursor: &mut WireCursor<'_>) -> Result<DecodedMessage> {
    let mut msg = DecodedMessage::new();
    msg.insert("data".to_string(), CodecValue::Float64(cursor.read_f64()?));
    Ok(msg)
}
