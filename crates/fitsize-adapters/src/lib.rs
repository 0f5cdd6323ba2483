//! fitsize adapters - External adapters for fitsize.
//!
//! This crate provides adapters for:
//! - Loading JPEG/PNG photos from disk
//! - Model weight storage, downloading and checksum verification

pub mod fs;
pub mod models;

pub use fs::{is_supported_photo, load_photo};
pub use models::{
    default_models_dir, DownloadEvent, ModelInfo, ModelSource, ModelStatus, ModelStore,
    MEASUREMENT_MODEL, MODELS, SEGMENTATION_MODEL,
};
