//! Classify command - sizes from an existing measurement set.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use fitsize_core::stages::classify;
use fitsize_core::{ApparelSizeResult, ApparelType, Error, MeasurementSet, SubjectMetadata};
use serde::Deserialize;
use tracing::debug;

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{Envelope, JsonOutput};

/// Arguments for the classify command
#[derive(Args, Clone)]
pub struct ClassifyArgs {
    /// JSON file with all 14 measurements
    #[arg(long, value_name = "FILE")]
    pub measurements: PathBuf,

    /// Gender: 0 = male, 1 = female
    #[arg(long)]
    pub gender: i64,

    /// Stated height in centimeters (100-250)
    #[arg(long)]
    pub height: f64,

    /// Weight in kilograms (30-300)
    #[arg(long)]
    pub weight: f64,

    /// Apparel type: tshirt, pants or all
    #[arg(long)]
    pub apparel: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Accepted measurement file shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum MeasurementFile {
    /// An `estimate --apparel all` result.
    Estimate { body_measurements: MeasurementSet },
    /// A bare measurement map.
    Bare(MeasurementSet),
}

/// Run the classify command, printing a results or error envelope.
pub fn run(args: &ClassifyArgs, config: &AppConfig) -> ExitCode {
    let pretty = args.pretty || config.output.pretty.unwrap_or(false);
    let output = JsonOutput::stdout(pretty);

    let (code, written) = match execute(args, config) {
        Ok(sizes) => (ExitCode::Success, output.write(&Envelope::Results(&sizes))),
        Err(e) => (
            ExitCode::for_error(&e),
            output.write(&Envelope::<()>::error(&e)),
        ),
    };

    if let Err(e) = written {
        eprintln!("error: {e:#}");
        return ExitCode::Error;
    }
    code
}

fn execute(args: &ClassifyArgs, config: &AppConfig) -> Result<ApparelSizeResult> {
    let metadata = SubjectMetadata::new(args.gender, args.height, args.weight)?;
    let apparel: ApparelType = args
        .apparel
        .as_deref()
        .or(config.estimate.apparel.as_deref())
        .unwrap_or("all")
        .parse()?;
    let measurements = read_measurements(&args.measurements)?;
    debug!("Classifying {apparel} for {} subject", metadata.gender());

    Ok(classify(&metadata, apparel, &measurements))
}

/// Reads a measurement file; a malformed set is invalid input.
fn read_measurements(path: &Path) -> Result<MeasurementSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file: MeasurementFile = serde_json::from_str(&content).map_err(|e| {
        Error::validation(
            "measurements",
            format!("{} must hold all 14 measurements: {e}", path.display()),
        )
    })?;
    Ok(match file {
        MeasurementFile::Estimate { body_measurements } => body_measurements,
        MeasurementFile::Bare(set) => set,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use fitsize_core::domain::Measurement;

    use super::*;

    const SET: &str = r#"{
        "ankle": 23, "arm-length": 60, "bicep": 31, "calf": 37, "chest": 98,
        "forearm": 27, "height": 175, "hip": 100, "leg-length": 80,
        "shoulder-breadth": 43, "shoulder-to-crotch": 65, "thigh": 55,
        "waist": 84, "wrist": 17
    }"#;

    fn write(content: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), content).unwrap();
        file
    }

    #[test]
    fn test_reads_bare_set() {
        let file = write(SET);
        let set = read_measurements(file.path()).unwrap();
        assert_eq!(set.get(Measurement::Chest), 98.0);
    }

    #[test]
    fn test_reads_estimate_output() {
        let file = write(&format!(
            r#"{{"body_measurements": {SET}, "tshirt_size": "M", "pants_size": 34}}"#
        ));
        let set = read_measurements(file.path()).unwrap();
        assert_eq!(set.get(Measurement::Waist), 84.0);
    }

    #[test]
    fn test_incomplete_set_is_invalid_input() {
        let file = write(r#"{"chest": 98}"#);
        let err = read_measurements(file.path()).unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidInput);
    }
}
