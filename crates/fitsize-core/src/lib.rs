//! fitsize core - body measurement estimation and apparel sizing
//!
//! This crate contains the domain types, the segmentation and prediction
//! ports, the three pipeline stages, and Candle implementations of both
//! models.

pub mod domain;
pub mod error;
pub mod inference;
pub mod pipeline;
pub mod ports;
pub mod stages;

pub use domain::{
    ApparelSizeResult, ApparelType, Gender, Measurement, MeasurementSet, NormalizedImage,
    PantsSize, RawImage, SubjectMetadata, TshirtSize, ViewSide,
};
pub use error::{Error, Result};
pub use pipeline::{Estimate, SizePipeline};
pub use ports::{MeasurementPredictor, Segmenter};
pub use stages::EstimateRequest;
