use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_state_file_survives_between_runs() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");

    // 1. Process a run against a fresh state file
    let mut cmd1 = Command::new(cargo_bin!("payrun"));
    cmd1.arg("--state").arg(&state).args([
        "process",
        "--period-start",
        "2025-02-01",
        "--period-end",
        "2025-02-28",
        "--pay-date",
        "2025-03-05",
        "--employee",
        "emp-2",
        "--notes",
        "February payroll",
    ]);
    cmd1.assert().success();
    assert!(state.exists());

    // 2. The new run is still there on the next invocation
    let mut cmd2 = Command::new(cargo_bin!("payrun"));
    cmd2.arg("--state").arg(&state).arg("runs");
    let output = cmd2.output().expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.contains("Feb 1, 2025 - Feb 28, 2025\tpaid Mar 5, 2025\t1 employees"));
}

#[test]
fn test_finalize_draft_run() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");

    let mut cmd = Command::new(cargo_bin!("payrun"));
    cmd.arg("--state").arg(&state).args(["finalize", "run-3"]);
    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 11);

    let mut cmd = Command::new(cargo_bin!("payrun"));
    cmd.arg("--state").arg(&state).arg("runs");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("run-3\tProcessed"));

    // A processed run cannot be finalized again.
    let mut cmd = Command::new(cargo_bin!("payrun"));
    cmd.arg("--state").arg(&state).args(["finalize", "run-3"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("already processed"));
}

#[test]
fn test_toggle_persistence_removes_state_file() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");

    let mut cmd = Command::new(cargo_bin!("payrun"));
    cmd.arg("--state").arg(&state).arg("reset");
    cmd.assert().success();
    assert!(state.exists());

    let mut cmd = Command::new(cargo_bin!("payrun"));
    cmd.arg("--state").arg(&state).arg("toggle-persistence");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Persistence disabled"));
    assert!(!state.exists());
}

#[test]
fn test_corrupt_state_file_falls_back_to_seed() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(&state, "{ not json").unwrap();

    let mut cmd = Command::new(cargo_bin!("payrun"));
    cmd.arg("--state").arg(&state).arg("employees");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Failed to load saved state"))
        .stdout(predicate::str::contains(r#""Zoe Wilson""#));
}
