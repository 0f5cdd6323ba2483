//! Foreground extraction.
//!
//! Turns an encoded photo into a normalized silhouette:
//! - Segment the subject to get an alpha matte
//! - Composite a white subject over a black background
//! - Resize the grayscale result to 128x128 and scale to `[0, 1]`

use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbaImage};
use tracing::{debug, warn};

use crate::domain::{NormalizedImage, RawImage, ViewSide, NORMALIZED_SIZE};
use crate::error::{Error, Result};
use crate::ports::Segmenter;

/// Foreground extraction stage.
pub struct ForegroundExtractor {
    segmenter: Arc<dyn Segmenter>,
}

impl ForegroundExtractor {
    /// Creates an extractor around a shared segmentation engine.
    #[must_use]
    pub fn new(segmenter: Arc<dyn Segmenter>) -> Self {
        Self { segmenter }
    }

    /// Extracts the normalized silhouette of one photo.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Processing`] tagged with `side` if the photo cannot
    /// be decoded or segmented.
    pub fn extract(&self, raw: &RawImage, side: ViewSide) -> Result<NormalizedImage> {
        debug!("Decoding {side} image ({} bytes)", raw.len());
        let image = image::load_from_memory(raw.as_bytes()).map_err(|e| {
            warn!("Failed to decode {side} image: {e}");
            Error::processing(side, e)
        })?;

        let cutout = self.segmenter.segment(&image).map_err(|e| {
            warn!("Segmentation of {side} image failed: {e:#}");
            Error::processing(side, e)
        })?;

        let silhouette = silhouette_from_alpha(&cutout);
        let normalized = normalize(&silhouette).map_err(|e| Error::processing(side, e))?;

        debug!(
            "Extracted {side} silhouette via {}: coverage {:.3}",
            self.segmenter.name(),
            normalized.mean()
        );
        Ok(normalized)
    }
}

/// Composites the matte as a white subject over an opaque black background.
///
/// White at alpha `a` over black yields gray level `a`, so the result is the
/// alpha channel itself.
#[must_use]
pub fn silhouette_from_alpha(cutout: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(cutout.width(), cutout.height(), |x, y| {
        Luma([cutout.get_pixel(x, y)[3]])
    })
}

/// Resizes a silhouette to the model resolution and scales it to `[0, 1]`.
///
/// # Errors
///
/// Returns an error if the image has no pixels.
pub fn normalize(silhouette: &GrayImage) -> anyhow::Result<NormalizedImage> {
    anyhow::ensure!(
        silhouette.width() > 0 && silhouette.height() > 0,
        "image has no pixels"
    );
    let resized = imageops::resize(
        silhouette,
        NORMALIZED_SIZE,
        NORMALIZED_SIZE,
        FilterType::CatmullRom,
    );
    NormalizedImage::from_luma(&resized)
}
