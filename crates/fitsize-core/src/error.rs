//! Error types for the estimation pipeline.

use thiserror::Error;

use crate::domain::ViewSide;

/// Boxed cause carried by processing and prediction errors.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that terminate an estimation request.
///
/// Each variant identifies the stage that failed. No stage retries or
/// continues with defaults after one of these is raised.
#[derive(Debug, Error)]
pub enum Error {
    /// A request field is malformed or out of range.
    #[error("invalid {field}: {constraint}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// The valid range or set, with the rejected value.
        constraint: String,
    },

    /// A photo could not be decoded or segmented.
    #[error("failed to process {side} image")]
    Processing {
        /// Which photo failed.
        side: ViewSide,
        /// Underlying cause.
        #[source]
        source: Cause,
    },

    /// The prediction capability failed or returned malformed output.
    #[error("measurement prediction failed")]
    Prediction {
        /// Underlying cause.
        #[source]
        source: Cause,
    },
}

impl Error {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: &'static str, constraint: impl Into<String>) -> Self {
        Self::Validation {
            field,
            constraint: constraint.into(),
        }
    }

    /// Create a processing error for one side of the request.
    #[must_use]
    pub fn processing(side: ViewSide, source: impl Into<Cause>) -> Self {
        Self::Processing {
            side,
            source: source.into(),
        }
    }

    /// Create a prediction error.
    #[must_use]
    pub fn prediction(source: impl Into<Cause>) -> Self {
        Self::Prediction {
            source: source.into(),
        }
    }

    /// Returns true for errors caused by the caller's input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns the stage name this error belongs to.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Processing { .. } => "foreground extraction",
            Self::Prediction { .. } => "measurement estimation",
        }
    }
}
