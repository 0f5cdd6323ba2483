//! CLI argument validation tests.
//!
//! Tests command-line parsing, request validation, exit codes and the JSON
//! envelope. No model weights are installed, so `estimate` can only succeed
//! as far as validation.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use fitsize_test_support::SyntheticImageBuilder;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Command isolated from the user's config and data directories.
fn fitsize(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fitsize").unwrap();
    cmd.current_dir(home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"));
    cmd
}

/// Writes synthetic front and side photos.
fn photos(dir: &Path) -> (PathBuf, PathBuf) {
    let front = dir.join("front.png");
    let side = dir.join("side.jpg");
    std::fs::write(&front, SyntheticImageBuilder::silhouette_png(120, 240).as_bytes()).unwrap();
    std::fs::write(&side, SyntheticImageBuilder::silhouette_jpeg(90, 240).as_bytes()).unwrap();
    (front, side)
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// === Parsing ===

#[test]
fn test_missing_subcommand_shows_usage() {
    let home = tempfile::tempdir().unwrap();
    fitsize(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    fitsize(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("estimate")
            .and(predicate::str::contains("classify"))
            .and(predicate::str::contains("charts"))
            .and(predicate::str::contains("models")),
    );
}

// === Estimate validation ===

#[test]
fn test_invalid_gender_is_exit_1() {
    let home = tempfile::tempdir().unwrap();
    let (front, side) = photos(home.path());

    let output = fitsize(&home)
        .arg("estimate")
        .arg(&front)
        .arg(&side)
        .args(["--gender", "2", "--height", "175", "--weight", "70"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert!(json["error"].as_str().unwrap().contains("gender"));
    assert!(json.get("results").is_none());
}

#[test]
fn test_height_out_of_range_is_exit_1() {
    let home = tempfile::tempdir().unwrap();
    let (front, side) = photos(home.path());

    let output = fitsize(&home)
        .arg("estimate")
        .arg(&front)
        .arg(&side)
        .args(["--gender", "0", "--height", "260", "--weight", "70"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_json(&output)["error"]
        .as_str()
        .unwrap()
        .contains("height_cm"));
}

#[test]
fn test_unknown_apparel_is_exit_1() {
    let home = tempfile::tempdir().unwrap();
    let (front, side) = photos(home.path());

    fitsize(&home)
        .arg("estimate")
        .arg(&front)
        .arg(&side)
        .args(["--gender", "0", "--height", "175", "--weight", "70"])
        .args(["--apparel", "socks"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("apparel_type"));
}

#[test]
fn test_input_json_is_validated() {
    let home = tempfile::tempdir().unwrap();
    let (front, side) = photos(home.path());

    fitsize(&home)
        .arg("estimate")
        .arg(&front)
        .arg(&side)
        .args(["--input", r#"{"gender": 0, "height_cm": 175, "weight_kg": 12}"#])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("weight_kg"));
}

#[test]
fn test_missing_metadata_is_exit_1() {
    let home = tempfile::tempdir().unwrap();
    let (front, side) = photos(home.path());

    fitsize(&home)
        .arg("estimate")
        .arg(&front)
        .arg(&side)
        .args(["--gender", "0"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("is required"));
}

#[test]
fn test_unsupported_file_type_is_exit_1() {
    let home = tempfile::tempdir().unwrap();
    let (front, _) = photos(home.path());

    fitsize(&home)
        .arg("estimate")
        .arg(&front)
        .arg(home.path().join("side.gif"))
        .args(["--gender", "1", "--height", "160", "--weight", "55"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("side_image"));
}

#[test]
fn test_missing_models_is_exit_2() {
    let home = tempfile::tempdir().unwrap();
    let (front, side) = photos(home.path());

    let output = fitsize(&home)
        .arg("estimate")
        .arg(&front)
        .arg(&side)
        .args(["--gender", "0", "--height", "175", "--weight", "70"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout_json(&output)["error"]
        .as_str()
        .unwrap()
        .contains("models fetch"));
}

#[test]
fn test_missing_photo_is_exit_2() {
    let home = tempfile::tempdir().unwrap();

    fitsize(&home)
        .arg("estimate")
        .arg(home.path().join("front.png"))
        .arg(home.path().join("side.png"))
        .args(["--gender", "0", "--height", "175", "--weight", "70"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("front image"));
}

// === Charts ===

#[test]
fn test_charts_prints_both_genders() {
    let home = tempfile::tempdir().unwrap();
    let output = fitsize(&home).arg("charts").output().unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    let charts = json.as_array().unwrap();
    assert_eq!(charts.len(), 2);
    assert_eq!(charts[0]["gender"], "male");
    assert_eq!(charts[1]["tshirt"][0]["label"], "S");
    assert_eq!(charts[1]["pants"][0]["size"], 26);
}

#[test]
fn test_charts_unknown_gender_is_exit_1() {
    let home = tempfile::tempdir().unwrap();
    fitsize(&home)
        .args(["charts", "--gender", "3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("gender"));
}

// === Models ===

#[test]
fn test_models_path_respects_flag() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("weights");

    fitsize(&home)
        .args(["models", "path", "--models-dir"])
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("weights"));
}

#[test]
fn test_models_list_shows_missing() {
    let home = tempfile::tempdir().unwrap();

    fitsize(&home)
        .args(["models", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("segmentation.safetensors")
                .and(predicate::str::contains("0/2 models installed")),
        );
}

#[test]
fn test_models_fetch_requires_url() {
    let home = tempfile::tempdir().unwrap();

    fitsize(&home)
        .args(["models", "fetch"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No download URL"));
}
