//! Binary-level checks: usage output and non-interactive stop.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn no_command_prints_usage() {
    Command::cargo_bin("actsrv")
        .unwrap()
        .assert()
        .success()
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("stop"));
}

#[test]
fn stop_without_marker_is_not_an_error() {
    let dir = common::temp_dir();
    Command::cargo_bin("actsrv")
        .unwrap()
        .current_dir(dir.path())
        .args(["stop", "--no-hosts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No pid file found"))
        .stdout(predicate::str::contains("Skipping hosts file modification"));
}

#[test]
fn stop_with_corrupt_marker_warns_but_exits_zero() {
    let dir = common::temp_dir();
    std::fs::write(dir.path().join(".actsrv.pid"), "garbage").unwrap();

    Command::cargo_bin("actsrv")
        .unwrap()
        .current_dir(dir.path())
        .args(["stop", "--no-hosts"])
        .assert()
        .success()
        .stderr(predicate::str::contains("may not have stopped cleanly"));

    // Marker is kept for manual inspection.
    assert!(dir.path().join(".actsrv.pid").is_file());
}

#[test]
fn start_help_mentions_port_and_no_hosts() {
    Command::cargo_bin("actsrv")
        .unwrap()
        .args(["start", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--no-hosts"));
}
