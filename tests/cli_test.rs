use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_employee_export() {
    let mut cmd = Command::new(cargo_bin!("payrun"));
    cmd.arg("employees");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            r#""Name","Email","Phone","Department","Role","Hire Date","Base Salary","Status","Bank Name","Account No""#,
        ))
        .stdout(predicate::str::contains(
            r#""Zoe Wilson","zoe.wilson@company.com","+1-555-1001","Operations","Financial Analyst","2021-05-03","103648","Active","Metro Bank","****5139""#,
        ))
        .stdout(predicate::str::contains(r#""David Johnson""#));
}

#[test]
fn test_payslip_export_for_run() {
    let mut cmd = Command::new(cargo_bin!("payrun"));
    cmd.args(["payslips", "--run", "run-1"]);

    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    // Header plus the ten employees of the November run.
    assert_eq!(stdout.lines().count(), 11);
    assert!(stdout.contains(
        r#""Zoe Wilson","103648","9562","9562","956.20","8291.84","2028","2028","7534""#
    ));
}

#[test]
fn test_other_seed() {
    let mut cmd = Command::new(cargo_bin!("payrun"));
    cmd.args(["--seed", "7", "employees"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""John Smith","john.smith@company.com""#));
}

#[test]
fn test_runs_listing() {
    let mut cmd = Command::new(cargo_bin!("payrun"));
    cmd.arg("runs");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "run-1\tProcessed\tNov 1, 2024 - Nov 30, 2024\tpaid Dec 5, 2024\t10 employees",
        ))
        .stdout(predicate::str::contains("run-3\tDraft"))
        .stdout(predicate::str::contains("10 employees\t$0.00"));
}

#[test]
fn test_toggle_persistence_needs_state_file() {
    let mut cmd = Command::new(cargo_bin!("payrun"));
    cmd.arg("toggle-persistence");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No --state file given"));
}

#[test]
fn test_summary() {
    let mut cmd = Command::new(cargo_bin!("payrun"));
    cmd.args(["summary", "--today", "2025-01-10"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Active employees: 12 (0 inactive)"))
        .stdout(predicate::str::contains(
            "Last run total: $63,520.00 (paid Jan 5, 2025)",
        ))
        .stdout(predicate::str::contains("Next pay date: Feb 5, 2025"))
        .stdout(predicate::str::contains("Draft runs: 1"))
        .stdout(predicate::str::contains(
            "Payroll Run Draft\tPeriod: Jan 1, 2025 - Jan 31, 2025\tDraft\tFeb 5, 2025",
        ))
        .stdout(predicate::str::contains(
            "Employee Added\tZoe Singh joined HR\tActive\tJan 28, 2019",
        ));
}

#[test]
fn test_summary_without_upcoming_runs() {
    let mut cmd = Command::new(cargo_bin!("payrun"));
    cmd.args(["summary", "--today", "2025-06-01"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Next pay date: not scheduled"));
}
