// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoded record value model.
//!
//! Wire decoders produce a [`DecodedMessage`]: a tree of named fields that the
//! typed record decoders read through dotted paths such as
//! `"pose.pose.position"`. Geometry types keep their ROS layout, so a
//! `Vector3` is a struct with `x`, `y`, `z` fields and a `Quaternion` adds `w`.

use std::collections::HashMap;

/// Type alias for decoded message as field name -> value mapping.
pub type DecodedMessage = HashMap<String, CodecValue>;

/// Unified value type for decoded record fields.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecValue {
    /// Header sequence number (ROS1)
    UInt32(u32),
    Float64(f64),

    String(String),

    /// Timestamp as nanoseconds since Unix epoch
    Timestamp(i64),

    Array(Vec<CodecValue>),

    /// Nested message/struct
    Struct(DecodedMessage),
}

impl CodecValue {
    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CodecValue::UInt32(v) => Some(*v as f64),
            CodecValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the inner struct.
    pub fn as_struct(&self) -> Option<&DecodedMessage> {
        match self {
            CodecValue::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Get the timestamp value as nanoseconds.
    pub fn as_timestamp_nanos(&self) -> Option<i64> {
        match self {
            CodecValue::Timestamp(nanos) => Some(*nanos),
            _ => None,
        }
    }

    /// Get the timestamp value as seconds.
    pub fn as_timestamp_secs(&self) -> Option<f64> {
        self.as_timestamp_nanos().map(|ns| ns as f64 / 1e9)
    }

    /// Read `x`, `y`, `z` from a `Vector3`/`Point` shaped struct.
    pub fn as_vector3(&self) -> Option<[f64; 3]> {
        let s = self.as_struct()?;
        Some([
            s.get("x")?.as_f64()?,
            s.get("y")?.as_f64()?,
            s.get("z")?.as_f64()?,
        ])
    }

    /// Read `x`, `y`, `z`, `w` from a `Quaternion` shaped struct.
    pub fn as_quaternion(&self) -> Option<[f64; 4]> {
        let s = self.as_struct()?;
        Some([
            s.get("x")?.as_f64()?,
            s.get("y")?.as_f64()?,
            s.get("z")?.as_f64()?,
            s.get("w")?.as_f64()?,
        ])
    }

    // ========================================================================
    // Convenience Constructors
    // ========================================================================

    /// Create a Timestamp from ROS1 time (secs: u32, nsecs: u32).
    pub fn from_ros1_time(secs: u32, nsecs: u32) -> Self {
        CodecValue::Timestamp((secs as i64) * 1_000_000_000 + (nsecs as i64))
    }

    /// Create a Timestamp from ROS2 Time (sec: i32, nanosec: u32).
    pub fn from_ros2_time(sec: i32, nanosec: u32) -> Self {
        CodecValue::Timestamp((sec as i64) * 1_000_000_000 + (nanosec as i64))
    }

    /// Create a Timestamp from floating point seconds.
    pub fn from_secs(secs: f64) -> Self {
        CodecValue::Timestamp((secs * 1e9).round() as i64)
    }

    /// Build a `Vector3` shaped struct.
    pub fn vector3(v: [f64; 3]) -> Self {
        struct_of([
            ("x", CodecValue::Float64(v[0])),
            ("y", CodecValue::Float64(v[1])),
            ("z", CodecValue::Float64(v[2])),
        ])
    }

    /// Build a `Quaternion` shaped struct from `[x, y, z, w]`.
    pub fn quaternion(q: [f64; 4]) -> Self {
        struct_of([
            ("x", CodecValue::Float64(q[0])),
            ("y", CodecValue::Float64(q[1])),
            ("z", CodecValue::Float64(q[2])),
            ("w", CodecValue::Float64(q[3])),
        ])
    }
}

/// Build a struct value from `(name, value)` pairs.
pub fn struct_of<const N: usize>(fields: [(&str, CodecValue); N]) -> CodecValue {
    CodecValue::Struct(message_of(fields))
}

/// Build a decoded message from `(name, value)` pairs.
pub fn message_of<const N: usize>(fields: [(&str, CodecValue); N]) -> DecodedMessage {
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Dotted-path field access on decoded messages.
pub trait FieldAccess {
    /// Look up a nested field, e.g. `"twist.twist.linear"`.
    fn field(&self, path: &str) -> Option<&CodecValue>;

    /// Look up a numeric field.
    fn f64_at(&self, path: &str) -> Option<f64> {
        self.field(path).and_then(CodecValue::as_f64)
    }

    /// Look up a `Vector3`/`Point` field.
    fn vector3_at(&self, path: &str) -> Option<[f64; 3]> {
        self.field(path).and_then(CodecValue::as_vector3)
    }

    /// Look up a `Quaternion` field.
    fn quaternion_at(&self, path: &str) -> Option<[f64; 4]> {
        self.field(path).and_then(CodecValue::as_quaternion)
    }

    /// Look up a timestamp field in seconds.
    fn secs_at(&self, path: &str) -> Option<f64> {
        self.field(path).and_then(CodecValue::as_timestamp_secs)
    }
}

impl FieldAccess for DecodedMessage {
    fn field(&self, path: &str) -> Option<&CodecValue> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.as_struct()?.get(part)?;
        }
        Some(current)
    }
}
