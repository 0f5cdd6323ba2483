//! Body measurement vocabulary and measurement sets.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of measurements produced per prediction.
pub const MEASUREMENT_COUNT: usize = 14;

/// One entry of the closed measurement vocabulary.
///
/// Variants are declared in model output order, so `as usize` is the
/// position of the value in the prediction vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Measurement {
    Ankle,
    ArmLength,
    Bicep,
    Calf,
    Chest,
    Forearm,
    Height,
    Hip,
    LegLength,
    ShoulderBreadth,
    ShoulderToCrotch,
    Thigh,
    Waist,
    Wrist,
}

/// Measurements reported for t-shirt requests.
pub const UPPER_BODY: [Measurement; 7] = [
    Measurement::Chest,
    Measurement::ShoulderBreadth,
    Measurement::Bicep,
    Measurement::Forearm,
    Measurement::Wrist,
    Measurement::ArmLength,
    Measurement::ShoulderToCrotch,
];

/// Measurements reported for pants requests.
pub const LOWER_BODY: [Measurement; 6] = [
    Measurement::Waist,
    Measurement::Hip,
    Measurement::Thigh,
    Measurement::Calf,
    Measurement::Ankle,
    Measurement::LegLength,
];

impl Measurement {
    /// The whole vocabulary in model output order.
    pub const ALL: [Self; MEASUREMENT_COUNT] = [
        Self::Ankle,
        Self::ArmLength,
        Self::Bicep,
        Self::Calf,
        Self::Chest,
        Self::Forearm,
        Self::Height,
        Self::Hip,
        Self::LegLength,
        Self::ShoulderBreadth,
        Self::ShoulderToCrotch,
        Self::Thigh,
        Self::Waist,
        Self::Wrist,
    ];

    /// Position in the prediction vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Kebab-case name used in results.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ankle => "ankle",
            Self::ArmLength => "arm-length",
            Self::Bicep => "bicep",
            Self::Calf => "calf",
            Self::Chest => "chest",
            Self::Forearm => "forearm",
            Self::Height => "height",
            Self::Hip => "hip",
            Self::LegLength => "leg-length",
            Self::ShoulderBreadth => "shoulder-breadth",
            Self::ShoulderToCrotch => "shoulder-to-crotch",
            Self::Thigh => "thigh",
            Self::Waist => "waist",
            Self::Wrist => "wrist",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Measurement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| format!("unknown measurement '{s}'"))
    }
}

/// A subset of measurements keyed by name.
pub type MeasurementSubset = BTreeMap<Measurement, f64>;

/// The full set of 14 measurements in centimeters.
///
/// Every value is rounded to two decimals on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "MeasurementSubset", try_from = "MeasurementSubset")]
pub struct MeasurementSet {
    values: [f64; MEASUREMENT_COUNT],
}

impl MeasurementSet {
    /// Builds a set from values in model output order.
    #[must_use]
    pub fn from_values(values: [f64; MEASUREMENT_COUNT]) -> Self {
        Self {
            values: values.map(round_cm),
        }
    }

    /// Returns one measurement.
    #[must_use]
    pub const fn get(&self, measurement: Measurement) -> f64 {
        self.values[measurement.index()]
    }

    /// Iterates over all measurements in model output order.
    pub fn iter(&self) -> impl Iterator<Item = (Measurement, f64)> + '_ {
        Measurement::ALL.into_iter().map(|m| (m, self.get(m)))
    }

    /// Returns only the requested measurements.
    #[must_use]
    pub fn subset(&self, keys: &[Measurement]) -> MeasurementSubset {
        keys.iter().map(|&m| (m, self.get(m))).collect()
    }

    /// Returns every measurement keyed by name.
    #[must_use]
    pub fn to_map(&self) -> MeasurementSubset {
        self.subset(&Measurement::ALL)
    }
}

impl From<MeasurementSet> for MeasurementSubset {
    fn from(set: MeasurementSet) -> Self {
        set.to_map()
    }
}

impl TryFrom<MeasurementSubset> for MeasurementSet {
    type Error = String;

    fn try_from(map: MeasurementSubset) -> Result<Self, Self::Error> {
        let mut values = [0.0; MEASUREMENT_COUNT];
        for m in Measurement::ALL {
            let value = map
                .get(&m)
                .copied()
                .ok_or_else(|| format!("missing measurement '{m}'"))?;
            if !value.is_finite() {
                return Err(format!("measurement '{m}' is not a finite number"));
            }
            values[m.index()] = value;
        }
        Ok(Self::from_values(values))
    }
}

/// Rounds to two decimals.
fn round_cm(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
