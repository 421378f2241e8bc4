//! Integration tests for the arni binary.
//!
//! These tests verify end-to-end behavior including:
//! - Input validation at the command line
//! - Text and JSON rendering of evaluations
//! - Titration schedules and reference tables
//! - Configuration overrides

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to write a config file into a fresh temp dir
fn setup_config(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, contents).expect("Failed to write config");
    (temp_dir, path)
}

/// Helper to get the CLI with an empty (all-defaults) config
fn cli() -> (TempDir, Command) {
    let (temp_dir, config) = setup_config("");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("arni"));
    cmd.arg("--config").arg(config);
    (temp_dir, cmd)
}

fn evaluate_json(args: &[&str]) -> Value {
    let (_dir, mut cmd) = cli();
    let output = cmd
        .arg("evaluate")
        .args(args)
        .arg("--format")
        .arg("json")
        .output()
        .expect("Failed to run arni");
    assert!(output.status.success(), "arni failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_cli_help() {
    let (_dir, mut cmd) = cli();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Sacubitril/valsartan dose recommendation",
        ));
}

#[test]
fn test_no_prior_therapy_half_dose() {
    let value = evaluate_json(&[
        "--age", "65", "--weight", "75", "--prior", "none", "--renal", "normal", "--hepatic",
        "normal", "--hours-since-stop", "48",
    ]);

    assert_eq!(value["outcome"], "recommendation");
    assert_eq!(value["starting_dose"], "24/26 mg");
    assert_eq!(value["target_dose"], "97/103 mg");
    assert_eq!(value["reasons"], serde_json::json!(["not on adequate prior therapy"]));
    assert_eq!(value["schedule"].as_array().unwrap().len(), 4);
}

#[test]
fn test_washout_rejection() {
    let value = evaluate_json(&[
        "--age", "70", "--weight", "80", "--prior", "moderate-high", "--renal", "normal",
        "--hepatic", "normal", "--hours-since-stop", "20",
    ]);

    assert_eq!(value["outcome"], "rejected");
    assert_eq!(value["reason_code"], "washout_insufficient");
    assert_eq!(value["hours_remaining"], 16);
}

#[test]
fn test_severe_renal_from_egfr() {
    let value = evaluate_json(&[
        "--age", "60", "--weight", "70", "--prior", "moderate-high", "--egfr", "22",
        "--hepatic", "normal", "--hours-since-stop", "48",
    ]);

    assert_eq!(value["starting_dose"], "24/26 mg");
    assert_eq!(value["reasons"], serde_json::json!(["severe renal impairment"]));
}

#[test]
fn test_child_pugh_c_contraindicated() {
    let value = evaluate_json(&[
        "--age", "55", "--weight", "70", "--prior", "none", "--renal", "normal",
        "--child-pugh", "C", "--hours-since-stop", "0",
    ]);

    assert_eq!(value["outcome"], "rejected");
    assert_eq!(value["reason_code"], "hepatic_contraindicated");
}

#[test]
fn test_standard_tier_text_output() {
    let (_dir, mut cmd) = cli();
    cmd.args([
        "evaluate", "--age", "50", "--weight", "82.5", "--prior", "moderate-high", "--renal",
        "normal", "--hepatic", "normal", "--hours-since-stop", "36",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("DOSE RECOMMENDATION"))
    .stdout(predicate::str::contains("Starting dose: 49/51 mg BID"))
    .stdout(predicate::str::contains("week 4+"))
    .stdout(predicate::str::contains("Reduced starting dose").not());
}

#[test]
fn test_rejection_text_output() {
    let (_dir, mut cmd) = cli();
    cmd.args([
        "evaluate", "--age", "70", "--weight", "80", "--prior", "moderate-high", "--renal",
        "normal", "--hepatic", "normal", "--hours-since-stop", "30",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("DO NOT START"))
    .stdout(predicate::str::contains("Wait 6 more hours"));
}

#[test]
fn test_out_of_range_age_rejected() {
    let (_dir, mut cmd) = cli();
    cmd.args([
        "evaluate", "--age", "121", "--weight", "80", "--prior", "none", "--renal", "normal",
        "--hepatic", "normal", "--hours-since-stop", "0",
    ])
    .assert()
    .failure();
}

#[test]
fn test_out_of_range_weight_rejected() {
    let (_dir, mut cmd) = cli();
    cmd.args([
        "evaluate", "--age", "40", "--weight", "250", "--prior", "none", "--renal", "normal",
        "--hepatic", "normal", "--hours-since-stop", "0",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("weight"));
}

#[test]
fn test_unknown_label_rejected() {
    let (_dir, mut cmd) = cli();
    cmd.args([
        "evaluate", "--age", "40", "--weight", "80", "--prior", "sometimes", "--renal",
        "normal", "--hepatic", "normal", "--hours-since-stop", "0",
    ])
    .assert()
    .failure();
}

#[test]
fn test_renal_and_egfr_conflict() {
    let (_dir, mut cmd) = cli();
    cmd.args([
        "evaluate", "--age", "40", "--weight", "80", "--prior", "none", "--renal", "normal",
        "--egfr", "80", "--hepatic", "normal", "--hours-since-stop", "0",
    ])
    .assert()
    .failure();
}

#[test]
fn test_schedule_command() {
    let (_dir, mut cmd) = cli();
    let output = cmd
        .args(["schedule", "--tier", "standard", "--format", "json"])
        .output()
        .expect("Failed to run arni");
    assert!(output.status.success());

    let steps: Value = serde_json::from_slice(&output.stdout).unwrap();
    let steps = steps.as_array().unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["window"], "week 0");
    assert_eq!(steps[2]["dose"], "97/103 mg");
}

#[test]
fn test_reference_list_and_show() {
    let (_dir, mut cmd) = cli();
    cmd.arg("reference")
        .assert()
        .success()
        .stdout(predicate::str::contains("hepatic-adjustment"));

    let (_dir, mut cmd) = cli();
    cmd.args(["reference", "strengths"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Light pink"));
}

#[test]
fn test_reference_unknown_table() {
    let (_dir, mut cmd) = cli();
    cmd.args(["reference", "dosage-forms"]).assert().failure();
}

#[test]
fn test_config_sets_json_and_hides_advisories() {
    let (_dir, config) = setup_config("[output]\nformat = \"json\"\nshow_advisories = false\n");

    let output = Command::new(assert_cmd::cargo::cargo_bin!("arni"))
        .arg("--config")
        .arg(&config)
        .args([
            "evaluate", "--age", "80", "--weight", "70", "--prior", "moderate-high", "--renal",
            "moderate", "--hepatic", "normal", "--hours-since-stop", "40",
        ])
        .output()
        .expect("Failed to run arni");
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["starting_dose"], "49/51 mg");
    assert!(value["advisories"].as_array().unwrap().is_empty());
}

#[test]
fn test_invalid_config_fails() {
    let (_dir, config) = setup_config("[logging]\nlevel = \"loud\"\n");

    Command::new(assert_cmd::cargo::cargo_bin!("arni"))
        .arg("--config")
        .arg(&config)
        .args(["schedule", "--tier", "half"])
        .assert()
        .failure();
}

#[test]
fn test_hidden_advisories_keep_contraindication_text() {
    let (_dir, config) = setup_config("[output]\nshow_advisories = false\n");

    Command::new(assert_cmd::cargo::cargo_bin!("arni"))
        .arg("--config")
        .arg(&config)
        .args([
            "evaluate", "--age", "55", "--weight", "70", "--prior", "none", "--renal", "normal",
            "--child-pugh", "C", "--hours-since-stop", "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("DO NOT START"))
        .stdout(predicate::str::contains(
            "No studies support use in severe hepatic impairment",
        ));
}

#[test]
fn test_schedule_matches_evaluate_schedule() {
    let value = evaluate_json(&[
        "--age", "50", "--weight", "80", "--prior", "moderate-high", "--renal", "normal",
        "--hepatic", "normal", "--hours-since-stop", "48",
    ]);

    let (_dir, mut cmd) = cli();
    let output = cmd
        .args(["schedule", "--tier", "standard", "--format", "json"])
        .output()
        .expect("Failed to run arni");
    assert!(output.status.success());

    let steps: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(steps, value["schedule"]);
    assert_eq!(steps[1]["action"], "double if tolerated");
}

#[test]
fn test_prior_rejects_bare_moderate() {
    let (_dir, mut cmd) = cli();
    cmd.args([
        "evaluate", "--age", "40", "--weight", "80", "--prior", "moderate", "--renal",
        "normal", "--hepatic", "normal", "--hours-since-stop", "48",
    ])
    .assert()
    .failure();
}
