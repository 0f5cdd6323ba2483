//! Foreground segmentation port.

use image::{DynamicImage, RgbaImage};

/// Port for separating a person from the background.
pub trait Segmenter: Send + Sync {
    /// Returns the name of this segmentation engine.
    fn name(&self) -> &'static str;

    /// Segments a decoded photo.
    ///
    /// # Returns
    ///
    /// The photo at its original size with the alpha channel set to the
    /// foreground mask (255 = subject, 0 = background).
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails on this image.
    fn segment(&self, image: &DynamicImage) -> anyhow::Result<RgbaImage>;
}
