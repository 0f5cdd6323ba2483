//! Measurement estimation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{
    ApparelType, MeasurementSet, NormalizedImage, SubjectMetadata, MEASUREMENT_COUNT,
};
use crate::error::{Error, Result};
use crate::ports::MeasurementPredictor;

/// A validated estimation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateRequest {
    /// Subject inputs.
    pub metadata: SubjectMetadata,
    /// Which sizes and measurements to surface.
    pub apparel: ApparelType,
}

impl EstimateRequest {
    /// Validates raw request values.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn new(gender: i64, height_cm: f64, weight_kg: f64, apparel_type: &str) -> Result<Self> {
        Ok(Self {
            metadata: SubjectMetadata::new(gender, height_cm, weight_kg)?,
            apparel: apparel_type.parse()?,
        })
    }
}

/// Measurement estimation stage.
pub struct MeasurementEstimator {
    predictor: Arc<dyn MeasurementPredictor>,
}

impl MeasurementEstimator {
    /// Creates an estimator around a shared predictor.
    #[must_use]
    pub fn new(predictor: Arc<dyn MeasurementPredictor>) -> Self {
        Self { predictor }
    }

    /// Predicts the full measurement set for one subject.
    ///
    /// All 14 measurements are computed whatever apparel type was requested.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the metadata is out of range, and
    /// [`Error::Prediction`] if the predictor fails or returns anything but
    /// 14 finite values.
    pub fn estimate(
        &self,
        front: &NormalizedImage,
        side: &NormalizedImage,
        metadata: &SubjectMetadata,
    ) -> Result<MeasurementSet> {
        metadata.validate()?;

        let input = metadata.as_vector();
        debug!("Predicting measurements via {} with {input:?}", self.predictor.name());

        let output = self.predictor.predict(front, side, input).map_err(|e| {
            warn!("Predictor {} failed: {e:#}", self.predictor.name());
            Error::prediction(e)
        })?;

        let values: [f32; MEASUREMENT_COUNT] = output.as_slice().try_into().map_err(|_| {
            Error::prediction(format!(
                "expected {MEASUREMENT_COUNT} values, got {}",
                output.len()
            ))
        })?;

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::prediction(format!(
                "value at position {pos} is not finite"
            )));
        }

        Ok(MeasurementSet::from_values(values.map(f64::from)))
    }
}
