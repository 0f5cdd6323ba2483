//! Core domain types for measurement estimation and sizing.

mod image;
mod measurement;
mod result;
mod subject;

pub use image::{NormalizedImage, RawImage, NORMALIZED_SIZE};
pub use measurement::{
    Measurement, MeasurementSet, MeasurementSubset, LOWER_BODY, MEASUREMENT_COUNT, UPPER_BODY,
};
pub use result::{ApparelSizeResult, PantsSize, TshirtSize};
pub use subject::{ApparelType, Gender, SubjectMetadata, ViewSide, HEIGHT_CM_RANGE, WEIGHT_KG_RANGE};
