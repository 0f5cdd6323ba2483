//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use fitsize_core::domain::NormalizedImage;
use fitsize_core::ports::{MeasurementPredictor, Segmenter};
use image::{DynamicImage, RgbaImage};

/// Deterministic predictor returning a fixed vector.
///
/// Records calls and the last metadata vector for assertions.
pub struct StubPredictor {
    values: Vec<f32>,
    calls: Arc<Mutex<usize>>,
    last_metadata: Arc<Mutex<Option<[f32; 3]>>>,
}

impl StubPredictor {
    /// Creates a predictor that always returns `values`.
    #[must_use]
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            values,
            calls: Arc::new(Mutex::new(0)),
            last_metadata: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the number of `predict` calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the metadata vector of the most recent call.
    #[must_use]
    pub fn last_metadata(&self) -> Option<[f32; 3]> {
        *self
            .last_metadata
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl MeasurementPredictor for StubPredictor {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn predict(
        &self,
        _front: &NormalizedImage,
        _side: &NormalizedImage,
        metadata: [f32; 3],
    ) -> anyhow::Result<Vec<f32>> {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        *self
            .last_metadata
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(metadata);
        Ok(self.values.clone())
    }
}

/// Predictor that always fails.
pub struct FailingPredictor {
    message: &'static str,
}

impl FailingPredictor {
    /// Creates a predictor failing with `message`.
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl MeasurementPredictor for FailingPredictor {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn predict(
        &self,
        _front: &NormalizedImage,
        _side: &NormalizedImage,
        _metadata: [f32; 3],
    ) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("{}", self.message)
    }
}

/// Segmenter that treats bright pixels as the subject.
///
/// Pixels with luminance at or above the threshold get alpha 255, the rest 0.
pub struct MaskSegmenter {
    threshold: u8,
    calls: Arc<Mutex<usize>>,
}

impl MaskSegmenter {
    /// Creates a segmenter with the given luminance threshold.
    #[must_use]
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns the number of `segment` calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MaskSegmenter {
    fn default() -> Self {
        Self::new(128)
    }
}

impl Segmenter for MaskSegmenter {
    fn name(&self) -> &'static str {
        "luma-threshold"
    }

    fn segment(&self, image: &DynamicImage) -> anyhow::Result<RgbaImage> {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        let luma = image.to_luma8();
        let mut cutout = image.to_rgba8();
        for (pixel, l) in cutout.pixels_mut().zip(luma.pixels()) {
            pixel[3] = if l[0] >= self.threshold { 255 } else { 0 };
        }
        Ok(cutout)
    }
}

/// Segmenter that always fails.
#[derive(Default)]
pub struct FailingSegmenter;

impl Segmenter for FailingSegmenter {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn segment(&self, _image: &DynamicImage) -> anyhow::Result<RgbaImage> {
        anyhow::bail!("segmentation session unavailable")
    }
}
