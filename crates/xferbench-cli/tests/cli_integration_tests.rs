// Dweve XferBench - File Transfer Benchmark Reporting
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Test helper to create an xferbench command
fn xferbench_cmd() -> Command {
    let mut cmd = Command::cargo_bin("xferbench").expect("Failed to find xferbench binary");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_json(dir: &Path, rel: &str, value: Value) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture dir");
    }
    fs::write(path, value.to_string()).expect("Failed to write fixture");
}

fn results_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_json(
        dir.path(),
        "rsync_default_stats.json",
        json!({"duration_seconds": {"mean": 10.0, "stdev": 0.2, "cv_percent": 2.0}, "throughput_mbps": 800.0, "runs": 3}),
    );
    write_json(
        dir.path(),
        "tool_tar_zstd.json",
        json!({"duration_seconds": 6.0, "throughput_mbps": 1333.0}),
    );
    write_json(
        dir.path(),
        "parallel_rsync_p1.json",
        json!({"duration_seconds": 30.0, "throughput_mbps": 400.0}),
    );
    write_json(
        dir.path(),
        "parallel_rsync_p4.json",
        json!({"duration_seconds": 10.0, "throughput_mbps": 1200.0}),
    );
    dir
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    xferbench_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("XferBench - file transfer benchmark report generator"))
        .stdout(predicate::str::contains("RESULTS_DIR"));
}

#[test]
fn test_version_output() {
    xferbench_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("xferbench"));
}

#[test]
fn test_missing_argument_fails() {
    xferbench_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

// ===== Report Tests =====

#[test]
fn test_full_report() {
    let dir = results_dir();

    xferbench_cmd()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("BENCHMARK SUITE RESULTS"))
        .stdout(predicate::str::contains("PARALLEL TRANSFER RESULTS"))
        .stdout(predicate::str::contains("No resume results found."))
        .stdout(predicate::str::contains("# File Transfer Benchmark Results"))
        .stdout(predicate::str::contains(r"| tar --zstd \| ssh (zstd) |"))
        .stdout(predicate::str::contains("3.0x"))
        .stdout(predicate::str::contains("75%"));

    let summary: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
            .unwrap();
    let names: Vec<&str> = summary["benchmarks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["tar_zstd", "rsync_default", "rsync_p4", "rsync_p1"]);
    assert!(summary["network_ceiling_mbps"].is_null());
}

#[test]
fn test_logs_go_to_stderr() {
    let dir = results_dir();

    xferbench_cmd()
        .arg(dir.path())
        .env("RUST_LOG", "xferbench_core=info")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan complete").not())
        .stderr(predicate::str::contains("scan complete"));
}

#[test]
fn test_no_summary_and_no_markdown() {
    let dir = results_dir();

    xferbench_cmd()
        .arg(dir.path())
        .arg("--no-summary")
        .arg("--no-markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("BENCHMARK SUITE RESULTS"))
        .stdout(predicate::str::contains("# File Transfer Benchmark Results").not());

    assert!(!dir.path().join("summary.json").exists());
}

#[test]
fn test_custom_summary_file() {
    let dir = results_dir();

    xferbench_cmd()
        .arg(dir.path())
        .args(["--summary-file", "bench.json"])
        .assert()
        .success();

    assert!(dir.path().join("bench.json").exists());
    assert!(!dir.path().join("summary.json").exists());
}

#[test]
fn test_summary_file_outside_directory_rejected() {
    let root = TempDir::new().unwrap();
    let dir = root.path().join("results");
    fs::create_dir(&dir).unwrap();
    write_json(&dir, "tool_tar_zstd.json", json!({"duration_seconds": 6.0}));

    xferbench_cmd()
        .arg(&dir)
        .args(["--summary-file", "../escaped.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid summary file name"));

    assert!(!root.path().join("escaped.json").exists());
}

#[test]
fn test_malformed_file_is_skipped() {
    let dir = results_dir();
    fs::write(dir.path().join("tool_broken.json"), "{not json").unwrap();

    xferbench_cmd()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 skipped"))
        .stderr(predicate::str::contains("tool_broken.json"));
}

// ===== Error Tests =====

#[test]
fn test_missing_directory() {
    let dir = TempDir::new().unwrap();

    xferbench_cmd()
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_empty_directory() {
    let dir = TempDir::new().unwrap();

    xferbench_cmd()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: No benchmark results found"));

    assert!(!dir.path().join("summary.json").exists());
}

#[test]
fn test_all_files_unparseable() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tool_a.json"), "{oops").unwrap();

    xferbench_cmd()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could be parsed"));

    assert!(!dir.path().join("summary.json").exists());
}
