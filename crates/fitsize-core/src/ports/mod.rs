//! Port definitions for hexagonal architecture.
//!
//! These traits are the two opaque capabilities the pipeline consumes.
//! Implementations are constructed once and shared read-only across requests.

mod predictor;
mod segmenter;

pub use predictor::MeasurementPredictor;
pub use segmenter::Segmenter;
