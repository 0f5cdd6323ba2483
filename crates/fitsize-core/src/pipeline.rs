//! End-to-end estimation pipeline.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{ApparelSizeResult, MeasurementSet, RawImage, ViewSide};
use crate::error::Result;
use crate::ports::{MeasurementPredictor, Segmenter};
use crate::stages::{classify, EstimateRequest, ForegroundExtractor, MeasurementEstimator};

/// Measurements and sizes produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// All 14 measurements.
    pub measurements: MeasurementSet,
    /// Sizes and the surfaced measurement subset.
    pub sizes: ApparelSizeResult,
}

/// Segmentation, estimation and classification in sequence.
///
/// Holds the shared engines; build once and reuse for every request.
pub struct SizePipeline {
    extractor: ForegroundExtractor,
    estimator: MeasurementEstimator,
}

impl SizePipeline {
    /// Creates a pipeline around already-initialized engines.
    #[must_use]
    pub fn new(segmenter: Arc<dyn Segmenter>, predictor: Arc<dyn MeasurementPredictor>) -> Self {
        Self {
            extractor: ForegroundExtractor::new(segmenter),
            estimator: MeasurementEstimator::new(predictor),
        }
    }

    /// Estimates sizes from raw request values.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any image work if an input is out
    /// of range, otherwise the first stage error.
    pub fn estimate(
        &self,
        front: &RawImage,
        side: &RawImage,
        gender: i64,
        height_cm: f64,
        weight_kg: f64,
        apparel_type: &str,
    ) -> Result<ApparelSizeResult> {
        let request = EstimateRequest::new(gender, height_cm, weight_kg, apparel_type)?;
        Ok(self.run(front, side, &request)?.sizes)
    }

    /// Runs the pipeline for a validated request.
    ///
    /// # Errors
    ///
    /// Returns the first stage error; no partial result is produced.
    pub fn run(
        &self,
        front: &RawImage,
        side: &RawImage,
        request: &EstimateRequest,
    ) -> Result<Estimate> {
        debug!(
            "Estimating {} sizes for {} subject",
            request.apparel,
            request.metadata.gender()
        );

        let front = self.extractor.extract(front, ViewSide::Front)?;
        let side = self.extractor.extract(side, ViewSide::Side)?;

        let measurements = self.estimator.estimate(&front, &side, &request.metadata)?;
        let sizes = classify(&request.metadata, request.apparel, &measurements);

        info!(
            "Estimate complete: tshirt={}, pants={}",
            sizes
                .tshirt_size()
                .map_or_else(|| "-".to_string(), |s| s.to_string()),
            sizes
                .pants_size()
                .map_or_else(|| "-".to_string(), |s| s.to_string()),
        );

        Ok(Estimate {
            measurements,
            sizes,
        })
    }
}
