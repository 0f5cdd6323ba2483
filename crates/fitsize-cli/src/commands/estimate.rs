//! Estimate command - measurements and sizes from two photos.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use fitsize_adapters::load_photo;
use fitsize_core::inference::{get_device, MeasurementRegressor, SilhouetteSegmenter};
use fitsize_core::{ApparelSizeResult, Error, EstimateRequest, SizePipeline, ViewSide};
use serde::Deserialize;
use tracing::{debug, info};

use super::models::WeightPaths;
use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{Envelope, JsonOutput};

/// Apparel type used when neither CLI nor config sets one.
const DEFAULT_APPAREL: &str = "all";

/// Arguments for the estimate command
#[derive(Args, Clone)]
pub struct EstimateArgs {
    /// Front-view photo (JPEG or PNG)
    pub front: PathBuf,

    /// Side-view photo (JPEG or PNG)
    pub side: PathBuf,

    /// Gender: 0 = male, 1 = female
    #[arg(long)]
    pub gender: Option<i64>,

    /// Height in centimeters (100-250)
    #[arg(long)]
    pub height: Option<f64>,

    /// Weight in kilograms (30-300)
    #[arg(long)]
    pub weight: Option<f64>,

    /// Apparel type: tshirt, pants or all
    #[arg(long)]
    pub apparel: Option<String>,

    /// Request metadata as a JSON object; explicit flags win
    #[arg(long, value_name = "JSON")]
    pub input: Option<String>,

    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Request metadata in its JSON form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InputData {
    /// 0 = male, 1 = female. Integral floats are accepted.
    pub gender: Option<f64>,
    /// Height in centimeters.
    pub height_cm: Option<f64>,
    /// Weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Apparel type.
    pub apparel_type: Option<String>,
}

impl EstimateArgs {
    /// Builds a validated request from flags, `--input` JSON and config.
    ///
    /// Priority (lowest to highest): config, `--input`, flags.
    pub fn request(&self, config: &AppConfig) -> Result<EstimateRequest> {
        let input = match self.input {
            Some(ref json) => parse_input(json)?,
            None => InputData::default(),
        };

        let gender = match self.gender {
            Some(g) => g,
            None => gender_code(input.gender.ok_or_else(|| required("gender"))?)?,
        };
        let height = self
            .height
            .or(input.height_cm)
            .ok_or_else(|| required("height_cm"))?;
        let weight = self
            .weight
            .or(input.weight_kg)
            .ok_or_else(|| required("weight_kg"))?;
        let apparel = self
            .apparel
            .clone()
            .or(input.apparel_type)
            .or_else(|| config.estimate.apparel.clone())
            .unwrap_or_else(|| DEFAULT_APPAREL.to_string());

        Ok(EstimateRequest::new(gender, height, weight, &apparel)?)
    }
}

fn required(field: &'static str) -> Error {
    Error::validation(field, "is required")
}

fn parse_input(json: &str) -> Result<InputData> {
    serde_json::from_str(json)
        .map_err(|e| Error::validation("input_data", format!("must be a JSON object: {e}")).into())
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn gender_code(value: f64) -> Result<i64> {
    if value.fract() == 0.0 && value.is_finite() {
        Ok(value as i64)
    } else {
        Err(Error::validation("gender", format!("must be 0 (male) or 1 (female), got {value}")).into())
    }
}

/// Run the estimate command, printing a results or error envelope.
pub fn run(args: &EstimateArgs, config: &AppConfig) -> ExitCode {
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

fn execute(args: &EstimateArgs, config: &AppConfig) -> Result<ApparelSizeResult> {
    let request = args.request(config)?;
    let front = load_photo(&args.front, ViewSide::Front)?;
    let side = load_photo(&args.side, ViewSide::Side)?;
    info!(
        "Estimating {} sizes from {} and {}",
        request.apparel,
        args.front.display(),
        args.side.display()
    );

    let pipeline = build_pipeline(&WeightPaths::resolve(config, args.models_dir.clone()))?;
    let estimate = pipeline.run(&front, &side, &request)?;
    debug!("Measurements: {:?}", estimate.measurements.to_map());

    Ok(estimate.sizes)
}

/// Loads both engines once and wires them into a pipeline.
fn build_pipeline(paths: &WeightPaths) -> Result<SizePipeline> {
    paths.ensure_present()?;
    let device = get_device();

    let segmenter = SilhouetteSegmenter::load(&paths.segmentation, &device)
        .context("Failed to load segmentation model")?;
    let regressor = MeasurementRegressor::load(&paths.measurement, &device)
        .context("Failed to load measurement model")?;

    Ok(SizePipeline::new(Arc::new(segmenter), Arc::new(regressor)))
}
