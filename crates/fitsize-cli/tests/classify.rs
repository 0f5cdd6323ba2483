//! Size classification through the `classify` command.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use fitsize_core::Measurement;
use fitsize_test_support::MeasurementSetBuilder;
use serde_json::Value;
use tempfile::TempDir;

fn fitsize(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fitsize").unwrap();
    cmd.current_dir(home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"));
    cmd
}

/// Writes a measurement file built from `builder`.
fn measurement_file(home: &TempDir, builder: &MeasurementSetBuilder) -> PathBuf {
    let path = home.path().join("measurements.json");
    std::fs::write(&path, serde_json::to_string(&builder.build()).unwrap()).unwrap();
    path
}

fn classify(home: &TempDir, file: &Path, extra: &[&str]) -> (Option<i32>, Value) {
    let output = fitsize(home)
        .arg("classify")
        .arg("--measurements")
        .arg(file)
        .args(extra)
        .output()
        .unwrap();
    (
        output.status.code(),
        serde_json::from_slice(&output.stdout).unwrap(),
    )
}

#[test]
fn test_all_returns_both_sizes_and_every_measurement() {
    let home = tempfile::tempdir().unwrap();
    let file = measurement_file(&home, &MeasurementSetBuilder::new());

    let (code, json) = classify(&home, &file, &["--gender", "0", "--height", "175", "--weight", "72"]);

    assert_eq!(code, Some(0));
    let results = &json["results"];
    assert_eq!(results["tshirt_size"], "M");
    assert_eq!(results["pants_size"], 34);
    assert_eq!(results["body_measurements"].as_object().unwrap().len(), 14);
    assert_eq!(results["body_measurements"]["shoulder-breadth"], 43.0);
}

#[test]
fn test_tshirt_returns_upper_body() {
    let home = tempfile::tempdir().unwrap();
    let file = measurement_file(&home, &MeasurementSetBuilder::new());

    let (_, json) = classify(
        &home,
        &file,
        &["--gender", "1", "--height", "165", "--weight", "60", "--apparel", "tshirt"],
    );

    let upper = json["results"]["upper_body_measurements"].as_object().unwrap();
    assert_eq!(upper.len(), 7);
    assert!(upper.contains_key(Measurement::ShoulderToCrotch.name()));
    assert!(json["results"].get("pants_size").is_none());
}

#[test]
fn test_pants_returns_lower_body() {
    let home = tempfile::tempdir().unwrap();
    let file = measurement_file(&home, &MeasurementSetBuilder::new().waist(70.0).hip(95.0));

    let (_, json) = classify(
        &home,
        &file,
        &["--gender", "1", "--height", "165", "--weight", "60", "--apparel", "pants"],
    );

    assert_eq!(json["results"]["pants_size"], 28);
    assert_eq!(
        json["results"]["lower_body_measurements"]
            .as_object()
            .unwrap()
            .len(),
        6
    );
}

#[test]
fn test_tall_male_sizes() {
    let home = tempfile::tempdir().unwrap();
    let builder = MeasurementSetBuilder::new()
        .chest(90.0)
        .shoulder_breadth(40.0)
        .height(185.0);
    let file = measurement_file(&home, &builder);

    let (_, json) = classify(&home, &file, &["--gender", "0", "--height", "185", "--weight", "70"]);

    assert_eq!(json["results"]["tshirt_size"], "Tall S");
    assert_eq!(json["results"]["pants_size"], 36);
}

#[test]
fn test_weight_override() {
    let home = tempfile::tempdir().unwrap();
    let file = measurement_file(&home, &MeasurementSetBuilder::new().chest(90.0).height(170.0));

    let (_, json) = classify(&home, &file, &["--gender", "0", "--height", "170", "--weight", "100"]);

    assert_eq!(json["results"]["tshirt_size"], "XXL");
}

#[test]
fn test_oversized_waist_gets_largest_pants() {
    let home = tempfile::tempdir().unwrap();
    let file = measurement_file(&home, &MeasurementSetBuilder::new().waist(130.0).hip(150.0));

    let (_, male) = classify(&home, &file, &["--gender", "0", "--height", "175", "--weight", "90"]);
    let (_, female) = classify(&home, &file, &["--gender", "1", "--height", "175", "--weight", "70"]);

    assert_eq!(male["results"]["pants_size"], 42);
    assert_eq!(female["results"]["pants_size"], 38);
}

#[test]
fn test_incomplete_measurements_is_exit_1() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("partial.json");
    std::fs::write(&file, r#"{"chest": 98.0, "waist": 84.0}"#).unwrap();

    let (code, json) = classify(&home, &file, &["--gender", "0", "--height", "175", "--weight", "70"]);

    assert_eq!(code, Some(1));
    assert!(json["error"].as_str().unwrap().contains("measurements"));
}

#[test]
fn test_invalid_weight_is_exit_1() {
    let home = tempfile::tempdir().unwrap();
    let file = measurement_file(&home, &MeasurementSetBuilder::new());

    let (code, json) = classify(&home, &file, &["--gender", "0", "--height", "175", "--weight", "301"]);

    assert_eq!(code, Some(1));
    assert!(json["error"].as_str().unwrap().contains("weight_kg"));
}
