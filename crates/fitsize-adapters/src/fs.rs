//! Filesystem adapter for loading photos.

use std::path::Path;

use anyhow::{Context, Result};
use fitsize_core::{Error, RawImage, ViewSide};
use tracing::debug;

/// Accepted photo extensions: JPEG and PNG only.
const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Checks if a path has a supported photo extension.
#[must_use]
pub fn is_supported_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| PHOTO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}

/// Reads one photo from disk.
///
/// The bytes are not decoded here; decoding happens in the pipeline.
///
/// # Errors
///
/// Returns a [`fitsize_core::Error::Validation`] (downcastable from the
/// `anyhow` error) if the file is neither JPEG nor PNG, or an I/O error if it
/// cannot be read.
pub fn load_photo(path: &Path, side: ViewSide) -> Result<RawImage> {
    if !is_supported_photo(path) {
        return Err(Error::validation(
            field_for(side),
            format!("must be a JPEG or PNG file, got {}", path.display()),
        )
        .into());
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {side} image {}", path.display()))?;
    debug!("Loaded {side} image {} ({} bytes)", path.display(), bytes.len());

    Ok(RawImage::new(bytes))
}

const fn field_for(side: ViewSide) -> &'static str {
    match side {
        ViewSide::Front => "front_image",
        ViewSide::Side => "side_image",
    }
}
