//! Photo payloads and model-ready images.

use anyhow::{ensure, Result};
use image::GrayImage;

/// Edge length of a normalized image.
pub const NORMALIZED_SIZE: u32 = 128;

const PIXEL_COUNT: usize = (NORMALIZED_SIZE * NORMALIZED_SIZE) as usize;

/// Encoded photo bytes as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    bytes: Vec<u8>,
}

impl RawImage {
    /// Wraps encoded image bytes.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for RawImage {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// A 128x128 single-channel silhouette with intensities in `[0, 1]`.
///
/// Row-major, the subject bright on a dark background.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    data: Vec<f32>,
}

impl NormalizedImage {
    /// Converts a grayscale image of the normalized size.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not 128x128.
    pub fn from_luma(image: &GrayImage) -> Result<Self> {
        ensure!(
            image.dimensions() == (NORMALIZED_SIZE, NORMALIZED_SIZE),
            "expected {NORMALIZED_SIZE}x{NORMALIZED_SIZE} image, got {}x{}",
            image.width(),
            image.height()
        );
        let data = image.pixels().map(|p| f32::from(p[0]) / 255.0).collect();
        Ok(Self { data })
    }

    /// Wraps raw row-major intensities.
    ///
    /// # Errors
    ///
    /// Returns an error on a wrong length or a value outside `[0, 1]`.
    pub fn from_values(data: Vec<f32>) -> Result<Self> {
        ensure!(
            data.len() == PIXEL_COUNT,
            "expected {PIXEL_COUNT} values, got {}",
            data.len()
        );
        ensure!(
            data.iter().all(|v| (0.0..=1.0).contains(v)),
            "values must be within 0.0-1.0"
        );
        Ok(Self { data })
    }

    /// Returns the intensities in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (NORMALIZED_SIZE, NORMALIZED_SIZE)
    }

    /// Returns the intensity at `(x, y)`, if in bounds.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= NORMALIZED_SIZE || y >= NORMALIZED_SIZE {
            return None;
        }
        self.data
            .get((y * NORMALIZED_SIZE + x) as usize)
            .copied()
    }

    /// Mean intensity, the fraction of the frame covered by the subject.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f32 {
        self.data.iter().sum::<f32>() / self.data.len() as f32
    }
}
