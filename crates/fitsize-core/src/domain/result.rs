//! Sizing results returned to callers.

use std::fmt;

use serde::{Serialize, Serializer};

use super::MeasurementSubset;

/// A t-shirt size label such as `M` or `Tall XXL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TshirtSize {
    label: &'static str,
    tall: bool,
}

impl TshirtSize {
    /// Creates a size from a chart label.
    #[must_use]
    pub const fn new(label: &'static str, tall: bool) -> Self {
        Self { label, tall }
    }

    /// Chart label without the tall prefix.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Whether the tall fit applies.
    #[must_use]
    pub const fn is_tall(&self) -> bool {
        self.tall
    }
}

impl fmt::Display for TshirtSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tall {
            write!(f, "Tall {}", self.label)
        } else {
            f.write_str(self.label)
        }
    }
}

impl Serialize for TshirtSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A numeric pants size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PantsSize(pub u8);

impl fmt::Display for PantsSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sizes and measurements for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApparelSizeResult {
    /// T-shirt size with upper-body measurements.
    Tshirt {
        /// Selected size.
        tshirt_size: TshirtSize,
        /// Chest, shoulders, arms and torso.
        upper_body_measurements: MeasurementSubset,
    },
    /// Pants size with lower-body measurements.
    Pants {
        /// Selected size.
        pants_size: PantsSize,
        /// Waist, hip and legs.
        lower_body_measurements: MeasurementSubset,
    },
    /// Both sizes with every measurement.
    All {
        /// All 14 measurements.
        body_measurements: MeasurementSubset,
        /// Selected t-shirt size.
        tshirt_size: TshirtSize,
        /// Selected pants size.
        pants_size: PantsSize,
    },
}

impl ApparelSizeResult {
    /// The t-shirt size, if computed.
    #[must_use]
    pub const fn tshirt_size(&self) -> Option<TshirtSize> {
        match self {
            Self::Tshirt { tshirt_size, .. } | Self::All { tshirt_size, .. } => Some(*tshirt_size),
            Self::Pants { .. } => None,
        }
    }

    /// The pants size, if computed.
    #[must_use]
    pub const fn pants_size(&self) -> Option<PantsSize> {
        match self {
            Self::Pants { pants_size, .. } | Self::All { pants_size, .. } => Some(*pants_size),
            Self::Tshirt { .. } => None,
        }
    }

    /// The measurements surfaced to the caller.
    #[must_use]
    pub const fn measurements(&self) -> &MeasurementSubset {
        match self {
            Self::Tshirt {
                upper_body_measurements: m,
                ..
            }
            | Self::Pants {
                lower_body_measurements: m,
                ..
            }
            | Self::All {
                body_measurements: m,
                ..
            } => m,
        }
    }
}
