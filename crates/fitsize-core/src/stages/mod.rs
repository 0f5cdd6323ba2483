//! Pipeline stages.
//!
//! Foreground extraction and measurement estimation wrap the injected
//! capabilities; size classification is pure functions over static charts.

pub mod charts;
pub mod classifier;
mod estimator;
mod extractor;

pub use charts::{chart_for, PantsRow, SizeChart, TshirtRow, FEMALE_CHART, MALE_CHART};
pub use classifier::{classify, pants_size, tshirt_size, tshirt_tier};
pub use estimator::{EstimateRequest, MeasurementEstimator};
pub use extractor::{normalize, silhouette_from_alpha, ForegroundExtractor};
