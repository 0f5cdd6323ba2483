//! ML inference engine using Candle.
//!
//! Provides model loading and inference for:
//! - Silhouette segmentation (foreground matte)
//! - Body measurement regression

mod device;
mod loader;
mod regressor;
mod silhouette;

pub use device::get_device;
pub use loader::load_safetensors;
pub use regressor::MeasurementRegressor;
pub use silhouette::{SilhouetteSegmenter, SEGMENTATION_INPUT_SIZE};
