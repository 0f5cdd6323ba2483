//! Test support utilities for fitsize.
//!
//! Provides mocks for the segmentation and prediction ports plus synthetic
//! photo and measurement builders.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use fitsize_core::SizePipeline;
//! use fitsize_test_support::{MaskSegmenter, MeasurementSetBuilder, StubPredictor, SyntheticImageBuilder};
//!
//! let predictor = StubPredictor::new(MeasurementSetBuilder::new().chest(100.0).to_prediction());
//! let pipeline = SizePipeline::new(Arc::new(MaskSegmenter::default()), Arc::new(predictor));
//!
//! let front = SyntheticImageBuilder::silhouette_png(200, 400);
//! let side = SyntheticImageBuilder::silhouette_png(160, 400);
//! let result = pipeline.estimate(&front, &side, 0, 175.0, 72.0, "all");
//! assert!(result.is_ok());
//! ```

mod builders;
mod mocks;

pub use builders::{MeasurementSetBuilder, SyntheticImageBuilder};
pub use mocks::{FailingPredictor, FailingSegmenter, MaskSegmenter, StubPredictor};
