// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed record decoders.
//!
//! One decoder per consumed record shape. Each is explicit about which fields
//! are required (absence fails with [`EvalError::MissingField`]) and which are
//! optional (acceleration, header).
//!
//! Timestamps come from `header.stamp`. Records without a header fall back to
//! the archive log time.

use crate::core::{EvalError, FieldAccess, Result};
use crate::io::Record;
use crate::model::TrajectoryPoint;

/// Scalar actuator sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarSample {
    pub t: f64,
    pub value: f64,
}

/// Force and torque sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrenchSample {
    pub t: f64,
    pub force: [f64; 3],
    pub torque: [f64; 3],
}

/// Linear velocity sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocitySample {
    pub t: f64,
    pub linear: [f64; 3],
}

/// Record time in seconds.
pub fn stamp(record: &Record) -> Result<f64> {
    if record.message.field("header").is_none() {
        return Ok(record.log_time_secs());
    }
    record
        .message
        .secs_at("header.stamp")
        .ok_or_else(|| EvalError::missing_field("header.stamp"))
}

fn vector3(record: &Record, path: &str) -> Result<[f64; 3]> {
    record
        .message
        .vector3_at(path)
        .ok_or_else(|| EvalError::missing_field(path))
}

fn quaternion(record: &Record, path: &str) -> Result<[f64; 4]> {
    record
        .message
        .quaternion_at(path)
        .ok_or_else(|| EvalError::missing_field(path))
}

/// Decode a `TrajectoryPoint` record.
pub fn trajectory_point(record: &Record) -> Result<TrajectoryPoint> {
    let t = stamp(record)?;
    let linear_acceleration = record
        .message
        .vector3_at("acceleration.linear")
        .unwrap_or([0.0; 3]);
    let angular_acceleration = record
        .message
        .vector3_at("acceleration.angular")
        .unwrap_or([0.0; 3]);

    Ok(TrajectoryPoint::new(t, vector3(record, "pose.position")?)
        .with_orientation(quaternion(record, "pose.orientation")?)
        .with_velocity(
            vector3(record, "velocity.linear")?,
            vector3(record, "velocity.angular")?,
        )
        .with_acceleration(linear_acceleration, angular_acceleration))
}

/// Decode an odometry record into a trajectory point with zero acceleration.
pub fn odometry_point(record: &Record) -> Result<TrajectoryPoint> {
    let t = stamp(record)?;
    Ok(TrajectoryPoint::new(t, vector3(record, "pose.pose.position")?)
        .with_orientation(quaternion(record, "pose.pose.orientation")?)
        .with_velocity(
            vector3(record, "twist.twist.linear")?,
            vector3(record, "twist.twist.angular")?,
        ))
}

/// Decode a scalar record (`FloatStamped`, `Float64`).
pub fn scalar_sample(record: &Record) -> Result<ScalarSample> {
    let t = stamp(record)?;
    let value = record
        .message
        .f64_at("data")
        .ok_or_else(|| EvalError::missing_field("data"))?;
    Ok(ScalarSample { t, value })
}

/// Decode a `WrenchStamped` record.
pub fn wrench_sample(record: &Record) -> Result<WrenchSample> {
    Ok(WrenchSample {
        t: stamp(record)?,
        force: vector3(record, "wrench.force")?,
        torque: vector3(record, "wrench.torque")?,
    })
}

/// Decode the linear part of a `TwistStamped` record.
pub fn linear_velocity_sample(record: &Record) -> Result<VelocitySample> {
    Ok(VelocitySample {
        t: stamp(record)?,
        linear: vector3(record, "twist.linear")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{message_of, struct_of, CodecValue};

    fn header(secs: f64) -> CodecValue {
        struct_of([("stamp", CodecValue::from_secs(secs))])
    }

    #[test]
    fn test_scalar_with_header() {
        let record = Record::new(
            9_000_000_000,
            message_of([("header", header(1.5)), ("data", CodecValue::Float64(-3.0))]),
        );
        assert_eq!(
            scalar_sample(&record).unwrap(),
            ScalarSample { t: 1.5, value: -3.0 }
        );
    }

    #[test]
    fn test_scalar_without_header_uses_log_time() {
        let record = Record::new(2_000_000_000, message_of([("data", CodecValue::Float64(4.0))]));
        assert_eq!(scalar_sample(&record).unwrap().t, 2.0);
    }

    #[test]
    fn test_header_without_stamp() {
        let record = Record::new(
            0,
            message_of([
                ("header", struct_of([("frame_id", CodecValue::String("map".into()))])),
                ("data", CodecValue::Float64(1.0)),
            ]),
        );
        let err = scalar_sample(&record).unwrap_err();
        assert!(matches!(err, EvalError::MissingField { ref field } if field == "header.stamp"));
    }

    #[test]
    fn test_trajectory_point_acceleration_defaults() {
        let record = Record::new(
            0,
            message_of([
                ("header", header(3.0)),
                (
                    "pose",
                    struct_of([
                        ("position", CodecValue::vector3([1.0, 2.0, 3.0])),
                        ("orientation", CodecValue::quaternion([0.0, 0.0, 0.0, 1.0])),
                    ]),
                ),
                (
                    "velocity",
                    struct_of([
                        ("linear", CodecValue::vector3([0.1, 0.0, 0.0])),
                        ("angular", CodecValue::vector3([0.0, 0.0, 0.2])),
                    ]),
                ),
            ]),
        );
        let point = trajectory_point(&record).unwrap();
        assert_eq!(point.t, 3.0);
        assert_eq!(point.position, [1.0, 2.0, 3.0]);
        assert_eq!(point.angular_velocity, [0.0, 0.0, 0.2]);
        assert_eq!(point.linear_acceleration, [0.0; 3]);
    }

    #[test]
    fn test_wrench_missing_torque() {
        let record = Record::new(
            0,
            message_of([
                ("header", header(0.0)),
                ("wrench", struct_of([("force", CodecValue::vector3([1.0, 0.0, 0.0]))])),
            ]),
        );
        let err = wrench_sample(&record).unwrap_err();
        assert_eq!(err.to_string(), "Missing field 'wrench.torque' in record");
    }

    #[test]
    fn test_linear_velocity() {
        let record = Record::new(
            0,
            message_of([
                ("header", header(0.25)),
                (
                    "twist",
                    struct_of([
                        ("linear", CodecValue::vector3([0.5, 0.0, 0.0])),
                        ("angular", CodecValue::vector3([0.0; 3])),
                    ]),
                ),
            ]),
        );
        let sample = linear_velocity_sample(&record).unwrap();
        assert_eq!(sample.t, 0.25);
        assert_eq!(sample.linear, [0.5, 0.0, 0.0]);
    }
}
