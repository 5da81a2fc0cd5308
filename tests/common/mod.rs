// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

pub mod mcap_fixture;

use std::path::PathBuf;

use roboeval::core::{message_of, struct_of};
use roboeval::encoding::{FLOAT_STAMPED, ODOMETRY, TRAJECTORY_POINT, TWIST_STAMPED, WRENCH_STAMPED};
use roboeval::{CodecValue, DecodedMessage, MemorySource};

// ============================================================================
// Topics
// ============================================================================

pub const REFERENCE: &str = "/rexrov/reference";
pub const ERROR: &str = "/rexrov/error";
pub const ODOM: &str = "/rexrov/pose_gt";
pub const THRUSTERS: &str = "/rexrov/thrusters";
pub const FINS: &str = "/lauv/fins";
pub const MANAGER: &str = "/rexrov/thruster_manager/input_stamped";
pub const CURRENT: &str = "/hydrodynamics/current_velocity";
pub const PERTURBATION: &str = "/rexrov/wrench_perturbation";

/// Nanoseconds of a time in seconds.
pub fn nanos(secs: f64) -> u64 {
    (secs * 1e9).round() as u64
}

pub fn thruster_topic(index: usize, suffix: &str) -> String {
    format!("{THRUSTERS}/{index}/{suffix}")
}

pub fn fin_topic(index: usize, suffix: &str) -> String {
    format!("{FINS}/{index}/{suffix}")
}

// ============================================================================
// Message Builders
// ============================================================================

pub fn header(t: f64) -> CodecValue {
    struct_of([
        ("stamp", CodecValue::from_secs(t)),
        ("frame_id", CodecValue::String("world".to_string())),
    ])
}

fn linear_angular(linear: [f64; 3], angular: [f64; 3]) -> CodecValue {
    struct_of([
        ("linear", CodecValue::vector3(linear)),
        ("angular", CodecValue::vector3(angular)),
    ])
}

fn pose(position: [f64; 3], orientation: [f64; 4]) -> CodecValue {
    struct_of([
        ("position", CodecValue::vector3(position)),
        ("orientation", CodecValue::quaternion(orientation)),
    ])
}

/// `TrajectoryPoint` with identity orientation and zero velocity.
pub fn trajectory_point(t: f64, position: [f64; 3]) -> DecodedMessage {
    message_of([
        ("header", header(t)),
        ("pose", pose(position, [0.0, 0.0, 0.0, 1.0])),
        ("velocity", linear_angular([0.0; 3], [0.0; 3])),
        ("acceleration", linear_angular([0.0; 3], [0.0; 3])),
    ])
}

/// `Odometry` with identity orientation.
pub fn odometry(t: f64, position: [f64; 3], linear: [f64; 3]) -> DecodedMessage {
    message_of([
        ("header", header(t)),
        (
            "pose",
            struct_of([("pose", pose(position, [0.0, 0.0, 0.0, 1.0]))]),
        ),
        (
            "twist",
            struct_of([("twist", linear_angular(linear, [0.0; 3]))]),
        ),
    ])
}

pub fn float_stamped(t: f64, value: f64) -> DecodedMessage {
    message_of([("header", header(t)), ("data", CodecValue::Float64(value))])
}

pub fn wrench(t: f64, force: [f64; 3], torque: [f64; 3]) -> DecodedMessage {
    message_of([
        ("header", header(t)),
        (
            "wrench",
            struct_of([
                ("force", CodecValue::vector3(force)),
                ("torque", CodecValue::vector3(torque)),
            ]),
        ),
    ])
}

pub fn twist(t: f64, linear: [f64; 3]) -> DecodedMessage {
    message_of([("header", header(t)), ("twist", linear_angular(linear, [0.0; 3]))])
}

// ============================================================================
// Sources
// ============================================================================

/// A two-second run along x with a lateral error of 1 m then 3 m, two
/// thrusters with outputs `[-3, 5]` and `[-1, 2]`, and one sample on every
/// other channel.
pub fn rexrov_source() -> MemorySource {
    let mut source = MemorySource::new("rexrov")
        .with_channel(REFERENCE, TRAJECTORY_POINT)
        .with_channel(ODOM, ODOMETRY)
        .with_channel(thruster_topic(0, "thrust"), FLOAT_STAMPED)
        .with_channel(thruster_topic(1, "thrust"), FLOAT_STAMPED)
        .with_channel(thruster_topic(0, "input"), FLOAT_STAMPED)
        .with_channel(MANAGER, WRENCH_STAMPED)
        .with_channel(CURRENT, TWIST_STAMPED)
        .with_channel(PERTURBATION, WRENCH_STAMPED);

    source.push(REFERENCE, nanos(0.0), trajectory_point(0.0, [0.0, 0.0, 0.0]));
    source.push(REFERENCE, nanos(1.0), trajectory_point(1.0, [1.0, 0.0, 0.0]));

    source.push(ODOM, nanos(0.0), odometry(0.0, [0.0, 1.0, 0.0], [0.5, 0.0, 0.0]));
    source.push(ODOM, nanos(1.0), odometry(1.0, [1.0, 3.0, 0.0], [0.5, 0.0, 0.0]));

    let t0 = thruster_topic(0, "thrust");
    let t1 = thruster_topic(1, "thrust");
    source.push(&t0, nanos(0.0), float_stamped(0.0, -3.0));
    source.push(&t0, nanos(1.0), float_stamped(1.0, 5.0));
    source.push(&t1, nanos(0.0), float_stamped(0.0, -1.0));
    source.push(&t1, nanos(1.0), float_stamped(1.0, 2.0));
    source.push(&thruster_topic(0, "input"), nanos(0.0), float_stamped(0.0, 100.0));

    source.push(MANAGER, nanos(0.5), wrench(0.5, [10.0, 0.0, 0.0], [0.0, 0.0, 1.0]));
    source.push(CURRENT, nanos(0.5), twist(0.5, [0.2, 0.1, 0.0]));
    source.push(PERTURBATION, nanos(0.5), wrench(0.5, [0.0, 50.0, 0.0], [0.0; 3]));

    source
}

/// Unique temp path for a test artifact.
pub fn temp_path(name: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "roboeval_test_{}_{}.{}",
        std::process::id(),
        name,
        ext
    ))
}

/// Unique temp directory, created empty.
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("roboeval_test_{}_{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
