// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.

mod common;

use std::path::PathBuf;
use std::process::Command;

use common::mcap_fixture::{rexrov_topics, write_mcap};
use common::{temp_dir, temp_path};

/// Get the path to the roboeval binary.
fn roboeval_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("roboeval");
    path
}

/// Run roboeval with arguments and return output.
fn run(args: &[&str]) -> std::process::Output {
    Command::new(roboeval_bin())
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute roboeval")
}

/// Run roboeval and assert success.
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    if !output.status.success() {
        panic!(
            "Command failed: roboeval {:?}\nstderr: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run roboeval and assert failure.
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed: roboeval {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// General
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("KPI evaluation"));
    assert!(output.contains("inspect"));
    assert!(output.contains("evaluate"));
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains("roboeval"));
}

#[test]
fn test_cli_invalid_subcommand() {
    let stderr = run_err(&["nonexistent"]);
    assert!(stderr.contains("unrecognized") || stderr.contains("unknown"));
}

// ============================================================================
// Inspect
// ============================================================================

#[test]
fn test_inspect_info_nonexistent_file() {
    let stderr = run_err(&["inspect", "info", "/nonexistent/run.mcap"]);
    assert!(stderr.contains("Error"));
}

#[test]
fn test_inspect_info_and_roles() {
    let path = temp_path("cli_info", "mcap");
    write_mcap(&path, &rexrov_topics());
    let path_str = path.to_string_lossy().to_string();

    let info = run_ok(&["inspect", "info", &path_str]);
    assert!(info.contains("Format: MCAP"));
    assert!(info.contains("Channels: 3"));

    let filtered = run_ok(&["inspect", "info", &path_str, "--filter", "odometry"]);
    assert!(filtered.contains("/rexrov/pose_gt"));
    assert!(!filtered.contains("/rexrov/reference"));

    let roles = run_ok(&["inspect", "roles", &path_str]);
    assert!(roles.contains("/rexrov/thrusters"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_inspect_extract_json() {
    let path = temp_path("cli_extract", "mcap");
    write_mcap(&path, &rexrov_topics());
    let path_str = path.to_string_lossy().to_string();

    let output = run_ok(&["inspect", "extract", &path_str, "--json"]);
    let summary: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(summary["outcomes"]["thruster_output"]["status"], "extracted");

    let _ = std::fs::remove_file(&path);
}

// ============================================================================
// Evaluate
// ============================================================================

#[test]
fn test_evaluate_list() {
    let output = run_ok(&["evaluate", "list"]);
    assert!(output.contains("rmse"));
    assert!(output.contains("euclidean_error"));
    assert!(output.contains("PenaltyFunction"));
}

#[test]
fn test_evaluate_run_writes_outputs() {
    let path = temp_path("cli_run", "mcap");
    write_mcap(&path, &rexrov_topics());
    let config = temp_path("cli_run", "toml");
    std::fs::write(
        &config,
        "[[kpis]]\nfunc = \"max_abs_thrust\"\n\n[cost.weights]\nmax_abs_thrust = 2.0\n",
    )
    .unwrap();
    let out = temp_dir("cli_run_out");

    let output = run_ok(&[
        "evaluate",
        "run",
        &path.to_string_lossy(),
        "--config",
        &config.to_string_lossy(),
        "--output",
        &out.to_string_lossy(),
    ]);
    assert!(output.contains("max_abs_thrust"));
    assert!(output.contains("Cost: 10.000000"));
    assert!(out.join("computed_kpis.json").exists());
    assert!(out.join("kpi_labels.json").exists());
    assert!(out.join("cost_function.json").exists());

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(&config);
    let _ = std::fs::remove_dir_all(&out);
}

#[test]
fn test_evaluate_run_json_with_offset() {
    let path = temp_path("cli_json", "mcap");
    write_mcap(&path, &rexrov_topics());

    let output = run_ok(&[
        "evaluate",
        "run",
        &path.to_string_lossy(),
        "--time-offset",
        "0.5",
        "--json",
    ]);
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["format"], "MCAP");
    assert_eq!(report["time_offset"], 0.5);
    assert_eq!(report["kpis"]["max_error_position"], 3.0);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_evaluate_run_bad_config() {
    let path = temp_path("cli_bad", "toml");
    std::fs::write(&path, "unknown_key = 1\n").unwrap();

    let stderr = run_err(&[
        "evaluate",
        "run",
        "/nonexistent/run.mcap",
        "--config",
        &path.to_string_lossy(),
    ]);
    assert!(stderr.contains("Error"));

    let _ = std::fs::remove_file(&path);
}
