//! Subject metadata and request parameters.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Accepted body height in centimeters.
pub const HEIGHT_CM_RANGE: RangeInclusive<f64> = 100.0..=250.0;
/// Accepted body weight in kilograms.
pub const WEIGHT_KG_RANGE: RangeInclusive<f64> = 30.0..=300.0;

/// Which photo of the pair an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSide {
    /// Frontal photo.
    Front,
    /// Profile photo.
    Side,
}

impl fmt::Display for ViewSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Front => "front",
            Self::Side => "side",
        })
    }
}

/// Subject gender as encoded in the model's metadata vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Encoded as `0`.
    Male,
    /// Encoded as `1`.
    Female,
}

impl Gender {
    /// Both genders, in code order.
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    /// Decodes the numeric gender code.
    ///
    /// # Errors
    ///
    /// Returns a validation error for any code other than `0` or `1`.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::Male),
            1 => Ok(Self::Female),
            other => Err(Error::validation(
                "gender",
                format!("must be 0 (male) or 1 (female), got {other}"),
            )),
        }
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Male => 0,
            Self::Female => 1,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "male",
            Self::Female => "female",
        })
    }
}

/// Garment family requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApparelType {
    /// Upper body only.
    Tshirt,
    /// Lower body only.
    Pants,
    /// Both sizes and every measurement.
    #[default]
    All,
}

impl ApparelType {
    /// Accepted textual values.
    pub const NAMES: [&'static str; 3] = ["tshirt", "pants", "all"];

    /// Returns the textual value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tshirt => "tshirt",
            Self::Pants => "pants",
            Self::All => "all",
        }
    }
}

impl FromStr for ApparelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tshirt" => Ok(Self::Tshirt),
            "pants" => Ok(Self::Pants),
            "all" => Ok(Self::All),
            other => Err(Error::validation(
                "apparel_type",
                format!("must be 'tshirt', 'pants', or 'all', got '{other}'"),
            )),
        }
    }
}

impl fmt::Display for ApparelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated anthropometric inputs for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubjectMetadata {
    gender: Gender,
    height_cm: f64,
    weight_kg: f64,
}

impl SubjectMetadata {
    /// Validates and builds subject metadata from raw request values.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn new(gender: i64, height_cm: f64, weight_kg: f64) -> Result<Self> {
        let metadata = Self {
            gender: Gender::from_code(gender)?,
            height_cm,
            weight_kg,
        };
        metadata.validate()?;
        Ok(metadata)
    }

    /// Re-checks the numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns a validation error if height or weight is out of range or not finite.
    pub fn validate(&self) -> Result<()> {
        check_range("height_cm", self.height_cm, &HEIGHT_CM_RANGE)?;
        check_range("weight_kg", self.weight_kg, &WEIGHT_KG_RANGE)
    }

    /// Subject gender.
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// Stated height in centimeters.
    #[must_use]
    pub const fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Stated weight in kilograms.
    #[must_use]
    pub const fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Metadata vector fed to the predictor: `[gender, height_cm, weight_kg]`.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn as_vector(&self) -> [f32; 3] {
        [
            f32::from(self.gender.code()),
            self.height_cm as f32,
            self.weight_kg as f32,
        ]
    }
}

fn check_range(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> Result<()> {
    // NaN fails `contains`, so non-finite input is rejected here too
    if range.contains(&value) {
        Ok(())
    } else {
        Err(Error::validation(
            field,
            format!(
                "must be within {}-{}, got {value}",
                range.start(),
                range.end()
            ),
        ))
    }
}
