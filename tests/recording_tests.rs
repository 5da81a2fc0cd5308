// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Extraction tests over in-memory sources.

mod common;

use common::*;
use roboeval::core::message_of;
use roboeval::encoding::{FLOAT_STAMPED, ODOMETRY, TRAJECTORY_POINT, WRENCH_STAMPED};
use roboeval::{
    CodecValue, EvalError, FileFormat, MemorySource, Pass, PassOutcome, Recording, Role,
    TrajectoryKind,
};

#[test]
fn test_full_extraction() {
    let recording = Recording::from_source(&rexrov_source());

    assert!(recording.is_init());
    assert!(recording.summary().is_complete());
    assert_eq!(recording.format(), FileFormat::Memory);
    assert_eq!(recording.source_path(), "rexrov");

    assert_eq!(recording.desired().len(), 2);
    assert_eq!(recording.actual().len(), 2);
    assert!(recording.errors().is_none());
    assert_eq!(recording.time(), vec![0.0, 1.0]);

    assert_eq!(recording.n_thrusters(), 2);
    assert_eq!(recording.thruster_output(0).unwrap().values(), &[-3.0, 5.0]);
    assert_eq!(recording.thruster_output(1).unwrap().values(), &[-1.0, 2.0]);
    assert_eq!(recording.thruster_input(0).unwrap().values(), &[100.0]);
    assert_eq!(recording.thruster_manager_wrench().force(), &[[10.0, 0.0, 0.0]]);
    assert_eq!(recording.disturbance_wrench().force(), &[[0.0, 50.0, 0.0]]);
    assert_eq!(recording.ambient_current().values(), &[[0.2, 0.1, 0.0]]);
    assert_eq!(recording.n_fins(), 0);

    assert_eq!(
        recording.assignment().thruster_prefix(),
        Some(THRUSTERS)
    );
}

#[test]
fn test_pass_outcomes() {
    let recording = Recording::from_source(&rexrov_source());
    let summary = recording.summary();

    assert_eq!(
        summary.outcome(Pass::DesiredTrajectory),
        Some(&PassOutcome::Extracted { records: 2 })
    );
    assert_eq!(
        summary.outcome(Pass::ThrusterOutput),
        Some(&PassOutcome::Extracted { records: 4 })
    );
    assert_eq!(summary.outcome(Pass::TrackingError), Some(&PassOutcome::Absent));
    assert_eq!(summary.outcome(Pass::FinInput), Some(&PassOutcome::Absent));
    assert_eq!(summary.iter().count(), Pass::ALL.len());
}

#[test]
fn test_start_end_time() {
    let recording = Recording::from_source(&rexrov_source());
    assert_eq!(recording.start_time().unwrap(), 0.0);
    assert_eq!(recording.end_time().unwrap(), 1.0);

    let empty = Recording::from_source(&MemorySource::new("empty"));
    assert!(matches!(empty.start_time(), Err(EvalError::EmptyTrajectory)));
    assert!(matches!(empty.end_time(), Err(EvalError::EmptyTrajectory)));
}

#[test]
fn test_empty_source() {
    let recording = Recording::from_source(&MemorySource::new("empty"));
    assert!(recording.is_init());
    assert!(recording.summary().is_complete());
    assert!(recording.desired().is_empty());
    assert!(recording.actual().is_empty());
    assert_eq!(recording.n_thrusters(), 0);
    assert!(recording.assignment().is_empty());
}

#[test]
fn test_invalid_index() {
    let recording = Recording::from_source(&rexrov_source());

    match recording.thruster_output(7) {
        Err(EvalError::InvalidIndex { family, index }) => {
            assert_eq!(family, "thruster output");
            assert_eq!(index, 7);
        }
        other => panic!("expected InvalidIndex, got {other:?}"),
    }
    assert!(matches!(
        recording.thruster_input(1),
        Err(EvalError::InvalidIndex { .. })
    ));
    assert!(matches!(recording.fin_input(0), Err(EvalError::InvalidIndex { .. })));
    assert!(matches!(recording.fin_output(0), Err(EvalError::InvalidIndex { .. })));
    assert!(matches!(recording.fin_wrench(0), Err(EvalError::InvalidIndex { .. })));
}

#[test]
fn test_failed_pass_is_isolated() {
    let source = rexrov_source().with_failure(ODOM, "corrupt chunk");
    let recording = Recording::from_source(&source);

    assert!(recording.is_init());
    assert!(!recording.summary().is_complete());
    assert_eq!(recording.summary().failed_passes(), vec![Pass::ActualOdometry]);
    match recording.summary().outcome(Pass::ActualOdometry) {
        Some(PassOutcome::Failed { reason }) => assert!(reason.contains("corrupt chunk")),
        other => panic!("expected failure, got {other:?}"),
    }

    assert!(recording.actual().is_empty());
    assert_eq!(recording.desired().len(), 2);
    assert_eq!(recording.n_thrusters(), 2);
    assert_eq!(recording.ambient_current().len(), 1);
}

#[test]
fn test_malformed_record_fails_only_its_pass() {
    let mut source = rexrov_source();
    // no wrench field
    source.push(PERTURBATION, nanos(0.7), message_of([("header", header(0.7))]));

    let recording = Recording::from_source(&source);
    assert_eq!(recording.summary().failed_passes(), vec![Pass::DisturbanceWrench]);
    assert!(recording.disturbance_wrench().is_empty());
    assert_eq!(recording.thruster_manager_wrench().len(), 1);
}

#[test]
fn test_failed_family_member_drops_family() {
    let source = rexrov_source().with_failure(thruster_topic(1, "thrust"), "truncated");
    let recording = Recording::from_source(&source);

    assert_eq!(recording.summary().failed_passes(), vec![Pass::ThrusterOutput]);
    assert_eq!(recording.n_thrusters(), 0);
    assert_eq!(recording.thruster_input(0).unwrap().len(), 1);
}

#[test]
fn test_absent_odometry() {
    let source = MemorySource::new("reference only")
        .with_channel(REFERENCE, TRAJECTORY_POINT)
        .with_record(REFERENCE, nanos(0.0), trajectory_point(0.0, [0.0; 3]));
    let recording = Recording::from_source(&source);

    assert!(!recording.assignment().contains(Role::AchievedOdometry));
    assert_eq!(
        recording.summary().outcome(Pass::ActualOdometry),
        Some(&PassOutcome::Absent)
    );
    assert!(recording.actual().is_empty());
    assert!(recording.time().is_empty());
    assert_eq!(recording.desired().len(), 1);
}

#[test]
fn test_extraction_is_idempotent() {
    let source = rexrov_source();
    let a = Recording::from_source(&source);
    let b = Recording::from_source(&source);

    assert_eq!(a.summary(), b.summary());
    assert_eq!(a.desired(), b.desired());
    assert_eq!(a.actual(), b.actual());
    assert_eq!(a.thruster_outputs(), b.thruster_outputs());
}

#[test]
fn test_recorded_error_trajectory() {
    let source = rexrov_source()
        .with_channel(ERROR, TRAJECTORY_POINT)
        .with_record(ERROR, nanos(0.5), trajectory_point(0.5, [3.0, 4.0, 0.0]));
    let recording = Recording::from_source(&source);

    let errors = recording.errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.points()[0].position, [3.0, 4.0, 0.0]);
}

#[test]
fn test_fin_count_spans_families() {
    let source = MemorySource::new("lauv")
        .with_channel(fin_topic(0, "input"), FLOAT_STAMPED)
        .with_record(&fin_topic(0, "input"), nanos(0.0), float_stamped(0.0, 0.1))
        .with_record(&fin_topic(2, "output"), nanos(0.0), float_stamped(0.0, 0.2))
        .with_record(
            &fin_topic(3, "wrench_topic"),
            nanos(0.0),
            wrench(0.0, [1.0, 0.0, 0.0], [0.0; 3]),
        )
        .with_record(&fin_topic(0, "output"), nanos(0.0), float_stamped(0.0, 0.3));
    let recording = Recording::from_source(&source);

    assert_eq!(recording.assignment().fin_prefix(), Some(FINS));
    assert_eq!(recording.n_fins(), 3);
    assert_eq!(recording.fin_output(2).unwrap().values(), &[0.2]);
    assert_eq!(recording.fin_wrench(3).unwrap().force(), &[[1.0, 0.0, 0.0]]);
}

#[test]
fn test_trajectory_coords() {
    let recording = Recording::from_source(&rexrov_source());
    let desired = recording.trajectory_coords(TrajectoryKind::Desired);
    let actual = recording.trajectory_coords(TrajectoryKind::Actual);
    assert_eq!(desired.x, vec![0.0, 1.0]);
    assert_eq!(actual.y, vec![1.0, 3.0]);
}

#[test]
fn test_stamp_falls_back_to_log_time() {
    let source = MemorySource::new("float64")
        .with_channel(thruster_topic(0, "thrust"), "std_msgs/Float64")
        .with_record(
            &thruster_topic(0, "thrust"),
            2_500_000_000,
            message_of([("data", CodecValue::Float64(1.0))]),
        );
    let recording = Recording::from_source(&source);
    assert_eq!(recording.thruster_output(0).unwrap().time(), &[2.5]);
}

#[test]
fn test_odometry_type_drives_classification() {
    let source = MemorySource::new("odom")
        .with_channel("/vehicle/odom", ODOMETRY)
        .with_channel("/vehicle/thruster_manager/input", WRENCH_STAMPED);
    let recording = Recording::from_source(&source);
    assert_eq!(recording.assignment().get(Role::AchievedOdometry), Some("/vehicle/odom"));
    assert!(recording.assignment().contains(Role::ActuatorManagerWrench));
}

#[test]
fn test_open_missing_archive() {
    let err = Recording::open("/nonexistent/run.bag").unwrap_err();
    assert!(matches!(err, EvalError::ArchiveOpen { .. }));
}
