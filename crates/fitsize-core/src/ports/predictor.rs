//! Measurement prediction port.

use crate::domain::NormalizedImage;

/// Port for the trained measurement model.
///
/// Inputs are passed in a fixed order: front silhouette, side silhouette,
/// then the metadata vector `[gender, height_cm, weight_kg]`.
pub trait MeasurementPredictor: Send + Sync {
    /// Returns the name of this predictor.
    fn name(&self) -> &'static str;

    /// Predicts raw measurement values in model output order.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails.
    fn predict(
        &self,
        front: &NormalizedImage,
        side: &NormalizedImage,
        metadata: [f32; 3],
    ) -> anyhow::Result<Vec<f32>>;
}
