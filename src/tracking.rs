// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Tracking error between the desired and the actual trajectory.
//!
//! When the archive holds a recorded tracking-error trajectory it is used
//! as is. Otherwise the error is derived per actual sample inside
//! `[start_time, end_time]`, against the desired trajectory interpolated at
//! the sample time.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{EvalError, Result};
use crate::model::TrajectoryPoint;
use crate::recording::Recording;

/// Component of the tracking error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorTag {
    X,
    Y,
    Z,
    Position,
    LinearVelocity,
    AngularVelocity,
    Roll,
    Pitch,
    Yaw,
}

impl ErrorTag {
    pub const ALL: [ErrorTag; 9] = [
        ErrorTag::X,
        ErrorTag::Y,
        ErrorTag::Z,
        ErrorTag::Position,
        ErrorTag::LinearVelocity,
        ErrorTag::AngularVelocity,
        ErrorTag::Roll,
        ErrorTag::Pitch,
        ErrorTag::Yaw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorTag::X => "x",
            ErrorTag::Y => "y",
            ErrorTag::Z => "z",
            ErrorTag::Position => "position",
            ErrorTag::LinearVelocity => "linear_velocity",
            ErrorTag::AngularVelocity => "angular_velocity",
            ErrorTag::Roll => "roll",
            ErrorTag::Pitch => "pitch",
            ErrorTag::Yaw => "yaw",
        }
    }
}

impl fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorTag {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        ErrorTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| EvalError::config(format!("unknown error tag '{s}'")))
    }
}

/// One error sample: a scalar or a 3-vector depending on the tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorValue {
    Scalar(f64),
    Vector([f64; 3]),
}

impl ErrorValue {
    /// Absolute value or Euclidean norm.
    pub fn magnitude(&self) -> f64 {
        match self {
            ErrorValue::Scalar(v) => v.abs(),
            ErrorValue::Vector(v) => norm(v),
        }
    }
}

fn norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn sub(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Wrap an angle to `[-pi, pi)`.
pub fn wrap_angle(x: f64) -> f64 {
    (x + PI).rem_euclid(2.0 * PI) - PI
}

/// Hamilton product of `[x, y, z, w]` quaternions.
fn quaternion_multiply(a: &[f64; 4], b: &[f64; 4]) -> [f64; 4] {
    let [ax, ay, az, aw] = *a;
    let [bx, by, bz, bw] = *b;
    [
        aw * bx + ax * bw + ay * bz - az * by,
        aw * by - ax * bz + ay * bw + az * bx,
        aw * bz + ax * by - ay * bx + az * bw,
        aw * bw - ax * bx - ay * by - az * bz,
    ]
}

/// Rotation angle encoded by a quaternion.
fn quaternion_angle(q: &[f64; 4]) -> f64 {
    norm(&[q[0], q[1], q[2]]).atan2(q[3])
}

/// Tracking error at one time stamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryError {
    pub t: f64,
    pub position: [f64; 3],
    pub linear_velocity: [f64; 3],
    pub angular_velocity: [f64; 3],
    /// Wrapped roll, pitch and yaw differences
    pub rpy: [f64; 3],
    /// Overall attitude error angle in `[0, pi]`
    pub angle: f64,
}

impl TrajectoryError {
    /// Error of `actual` with respect to `desired`, stamped at the actual time.
    pub fn new(desired: &TrajectoryPoint, actual: &TrajectoryPoint) -> Self {
        let [qx, qy, qz, qw] = desired.orientation;
        let err_quat = quaternion_multiply(&[-qx, -qy, -qz, qw], &actual.orientation);

        let rpy_des = desired.euler();
        let rpy_act = actual.euler();

        Self {
            t: actual.t,
            position: sub(&desired.position, &actual.position),
            linear_velocity: sub(&desired.linear_velocity, &actual.linear_velocity),
            angular_velocity: sub(&desired.angular_velocity, &actual.angular_velocity),
            rpy: [
                wrap_angle(rpy_des[0] - rpy_act[0]),
                wrap_angle(rpy_des[1] - rpy_act[1]),
                wrap_angle(rpy_des[2] - rpy_act[2]),
            ],
            angle: quaternion_angle(&err_quat),
        }
    }

    /// Interpret a point of a recorded tracking-error trajectory.
    pub fn from_recorded(point: &TrajectoryPoint) -> Self {
        Self {
            t: point.t,
            position: point.position,
            linear_velocity: point.linear_velocity,
            angular_velocity: point.angular_velocity,
            rpy: point.euler(),
            angle: quaternion_angle(&point.orientation),
        }
    }

    pub fn get(&self, tag: ErrorTag) -> ErrorValue {
        match tag {
            ErrorTag::X => ErrorValue::Scalar(self.position[0]),
            ErrorTag::Y => ErrorValue::Scalar(self.position[1]),
            ErrorTag::Z => ErrorValue::Scalar(self.position[2]),
            ErrorTag::Position => ErrorValue::Vector(self.position),
            ErrorTag::LinearVelocity => ErrorValue::Vector(self.linear_velocity),
            ErrorTag::AngularVelocity => ErrorValue::Vector(self.angular_velocity),
            ErrorTag::Roll => ErrorValue::Scalar(self.rpy[0]),
            ErrorTag::Pitch => ErrorValue::Scalar(self.rpy[1]),
            ErrorTag::Yaw => ErrorValue::Scalar(self.rpy[2]),
        }
    }
}

/// Tracking error samples of a recording.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorSet {
    errors: Vec<TrajectoryError>,
    recorded: bool,
}

impl ErrorSet {
    /// Build the error set of a recording.
    ///
    /// Deriving the error requires a non-empty desired trajectory and fails
    /// with [`EvalError::EmptyTrajectory`] otherwise.
    pub fn from_recording(recording: &Recording) -> Result<Self> {
        if let Some(recorded) = recording.errors() {
            return Ok(Self {
                errors: recorded
                    .points()
                    .iter()
                    .map(TrajectoryError::from_recorded)
                    .collect(),
                recorded: true,
            });
        }

        let start = recording.start_time()?;
        let end = recording.end_time()?;
        let desired = recording.desired();

        let mut errors: Vec<TrajectoryError> = Vec::new();
        for actual in recording.actual().points() {
            if actual.t < start || actual.t > end {
                continue;
            }
            if errors.last().is_some_and(|last| actual.t <= last.t) {
                continue;
            }
            if let Some(reference) = desired.interpolate(actual.t) {
                errors.push(TrajectoryError::new(&reference, actual));
            }
        }

        Ok(Self {
            errors,
            recorded: false,
        })
    }

    /// Whether the samples come from a recorded error channel.
    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    pub fn errors(&self) -> &[TrajectoryError] {
        &self.errors
    }

    pub fn times(&self) -> Vec<f64> {
        self.errors.iter().map(|e| e.t).collect()
    }

    pub fn tags(&self) -> &'static [ErrorTag] {
        &ErrorTag::ALL
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error values of one tag for samples at or after `time_offset`.
    ///
    /// The offset must lie within `[0, t_last]`.
    pub fn values(&self, tag: ErrorTag, time_offset: f64) -> Result<Vec<ErrorValue>> {
        let last = self
            .errors
            .last()
            .ok_or_else(|| EvalError::insufficient_data("no tracking error samples"))?;

        if !(0.0..=last.t).contains(&time_offset) {
            return Err(EvalError::InvalidTimeOffset {
                offset: time_offset,
                max: last.t,
            });
        }

        Ok(self
            .errors
            .iter()
            .filter(|e| e.t >= time_offset)
            .map(|e| e.get(tag))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(1.5 * PI) + 0.5 * PI).abs() < 1e-12);
        assert!((wrap_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-12);
        assert_eq!(wrap_angle(0.25), 0.25);
    }

    #[test]
    fn test_error_tag_parse() {
        assert_eq!("linear_velocity".parse::<ErrorTag>().unwrap(), ErrorTag::LinearVelocity);
        assert!("heave".parse::<ErrorTag>().is_err());
        for tag in ErrorTag::ALL {
            assert_eq!(tag.as_str().parse::<ErrorTag>().unwrap(), tag);
        }
    }

    #[test]
    fn test_trajectory_error_position() {
        let desired = TrajectoryPoint::new(1.0, [1.0, 2.0, 3.0]);
        let actual = TrajectoryPoint::new(1.0, [0.0, 2.0, 5.0]);
        let err = TrajectoryError::new(&desired, &actual);
        assert_eq!(err.position, [1.0, 0.0, -2.0]);
        assert_eq!(err.get(ErrorTag::Z), ErrorValue::Scalar(-2.0));
        assert_eq!(err.angle, 0.0);
    }

    #[test]
    fn test_trajectory_error_yaw() {
        let half = std::f64::consts::FRAC_1_SQRT_2;
        let desired = TrajectoryPoint::new(0.0, [0.0; 3]).with_orientation([0.0, 0.0, half, half]);
        let actual = TrajectoryPoint::new(0.0, [0.0; 3]);
        let err = TrajectoryError::new(&desired, &actual);
        assert!((err.rpy[2] - PI / 2.0).abs() < 1e-9);
        assert!((err.angle - PI / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(ErrorValue::Scalar(-2.0).magnitude(), 2.0);
        assert_eq!(ErrorValue::Vector([3.0, 4.0, 0.0]).magnitude(), 5.0);
    }

    #[test]
    fn test_values_time_offset() {
        let set = ErrorSet {
            errors: vec![
                TrajectoryError::from_recorded(&TrajectoryPoint::new(1.0, [1.0, 0.0, 0.0])),
                TrajectoryError::from_recorded(&TrajectoryPoint::new(2.0, [2.0, 0.0, 0.0])),
            ],
            recorded: true,
        };
        assert_eq!(set.values(ErrorTag::X, 0.0).unwrap().len(), 2);
        assert_eq!(
            set.values(ErrorTag::X, 1.5).unwrap(),
            vec![ErrorValue::Scalar(2.0)]
        );
        assert!(matches!(
            set.values(ErrorTag::X, 3.0),
            Err(EvalError::InvalidTimeOffset { .. })
        ));
        assert!(set.values(ErrorTag::X, -1.0).is_err());
    }

    #[test]
    fn test_values_empty() {
        let err = ErrorSet::default().values(ErrorTag::Position, 0.0).unwrap_err();
        assert!(matches!(err, EvalError::InsufficientData { .. }));
    }
}
