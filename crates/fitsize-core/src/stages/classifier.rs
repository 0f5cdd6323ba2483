//! Apparel size classification.
//!
//! Maps a measurement set to t-shirt and pants sizes using the static
//! charts plus three fixed policy rules:
//! - Heavy subjects get `XXL` shirts regardless of the chart
//! - Subjects taller than 180 cm get the `Tall` shirt fit
//! - Tall men get pants two sizes up, unless already at 40 or above

use crate::domain::{
    ApparelSizeResult, ApparelType, Gender, Measurement, MeasurementSet, PantsSize,
    SubjectMetadata, TshirtSize, LOWER_BODY, UPPER_BODY,
};

use super::charts::{chart_for, first_fit};

/// Shirt label when the subject exceeds every chart row.
pub const FALLBACK_TSHIRT_LABEL: &str = "XXXL";
/// Shirt label forced by the weight override.
pub const WEIGHT_OVERRIDE_LABEL: &str = "XXL";
/// Men above this weight get the override label.
pub const MALE_OVERRIDE_WEIGHT_KG: f64 = 95.0;
/// Women above this weight get the override label.
pub const FEMALE_OVERRIDE_WEIGHT_KG: f64 = 80.0;
/// Measured height above which tall fits apply.
pub const TALL_HEIGHT_CM: f64 = 180.0;
/// Pants sizes at or above this are not adjusted for tall men.
pub const TALL_PANTS_CEILING: u8 = 40;
/// Pants size increment for tall men.
pub const TALL_PANTS_STEP: u8 = 2;

/// Returns the index of the t-shirt chart row the subject fits under, if any.
#[must_use]
pub fn tshirt_tier(gender: Gender, measurements: &MeasurementSet) -> Option<usize> {
    first_fit(
        chart_for(gender).tshirt,
        measurements.get(Measurement::Chest),
        measurements.get(Measurement::ShoulderBreadth),
    )
    .map(|(index, _)| index)
}

/// Computes the t-shirt size.
#[must_use]
pub fn tshirt_size(gender: Gender, measurements: &MeasurementSet, weight_kg: f64) -> TshirtSize {
    let chart_label = first_fit(
        chart_for(gender).tshirt,
        measurements.get(Measurement::Chest),
        measurements.get(Measurement::ShoulderBreadth),
    )
    .map_or(FALLBACK_TSHIRT_LABEL, |(_, label)| label);

    let override_weight = match gender {
        Gender::Male => MALE_OVERRIDE_WEIGHT_KG,
        Gender::Female => FEMALE_OVERRIDE_WEIGHT_KG,
    };
    let label = if weight_kg > override_weight {
        WEIGHT_OVERRIDE_LABEL
    } else {
        chart_label
    };

    TshirtSize::new(label, is_tall(measurements))
}

/// Computes the pants size.
#[must_use]
pub fn pants_size(gender: Gender, measurements: &MeasurementSet) -> PantsSize {
    let chart = chart_for(gender).pants;
    let base = first_fit(
        chart,
        measurements.get(Measurement::Waist),
        measurements.get(Measurement::Hip),
    )
    .map(|(_, size)| size)
    .or_else(|| chart.last().map(|row| row.size))
    .unwrap_or_default();

    let size = if gender == Gender::Male && is_tall(measurements) && base < TALL_PANTS_CEILING {
        base + TALL_PANTS_STEP
    } else {
        base
    };
    PantsSize(size)
}

/// Classifies a measurement set for the requested apparel type.
#[must_use]
pub fn classify(
    metadata: &SubjectMetadata,
    apparel: ApparelType,
    measurements: &MeasurementSet,
) -> ApparelSizeResult {
    let gender = metadata.gender();
    match apparel {
        ApparelType::Tshirt => ApparelSizeResult::Tshirt {
            tshirt_size: tshirt_size(gender, measurements, metadata.weight_kg()),
            upper_body_measurements: measurements.subset(&UPPER_BODY),
        },
        ApparelType::Pants => ApparelSizeResult::Pants {
            pants_size: pants_size(gender, measurements),
            lower_body_measurements: measurements.subset(&LOWER_BODY),
        },
        ApparelType::All => ApparelSizeResult::All {
            body_measurements: measurements.to_map(),
            tshirt_size: tshirt_size(gender, measurements, metadata.weight_kg()),
            pants_size: pants_size(gender, measurements),
        },
    }
}

fn is_tall(measurements: &MeasurementSet) -> bool {
    measurements.get(Measurement::Height) > TALL_HEIGHT_CM
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::MEASUREMENT_COUNT;

    fn body(chest: f64, shoulder: f64, waist: f64, hip: f64, height: f64) -> MeasurementSet {
        let mut values = [30.0; MEASUREMENT_COUNT];
        values[Measurement::Chest.index()] = chest;
        values[Measurement::ShoulderBreadth.index()] = shoulder;
        values[Measurement::Waist.index()] = waist;
        values[Measurement::Hip.index()] = hip;
        values[Measurement::Height.index()] = height;
        MeasurementSet::from_values(values)
    }

    #[test]
    fn test_weight_override_male() {
        let m = body(90.0, 40.0, 80.0, 100.0, 170.0);
        assert_eq!(tshirt_size(Gender::Male, &m, 100.0).to_string(), "XXL");
        assert_eq!(tshirt_size(Gender::Male, &m, 95.0).to_string(), "S");
    }

    #[test]
    fn test_weight_override_female() {
        let m = body(85.0, 36.0, 65.0, 90.0, 165.0);
        assert_eq!(tshirt_size(Gender::Female, &m, 80.5).to_string(), "XXL");
        assert_eq!(tshirt_size(Gender::Female, &m, 80.0).to_string(), "S");
    }

    #[test]
    fn test_tall_prefix() {
        let m = body(90.0, 40.0, 80.0, 100.0, 185.0);
        assert_eq!(tshirt_size(Gender::Male, &m, 70.0).to_string(), "Tall S");
        let m = body(90.0, 40.0, 80.0, 100.0, 180.0);
        assert_eq!(tshirt_size(Gender::Male, &m, 70.0).to_string(), "S");
    }

    #[test]
    fn test_tall_prefix_applies_after_override() {
        let m = body(90.0, 40.0, 80.0, 100.0, 190.0);
        assert_eq!(tshirt_size(Gender::Male, &m, 120.0).to_string(), "Tall XXL");
    }

    #[test]
    fn test_tshirt_fallback() {
        let m = body(150.0, 60.0, 80.0, 100.0, 170.0);
        assert_eq!(tshirt_size(Gender::Male, &m, 70.0).label(), "XXXL");
        assert_eq!(tshirt_tier(Gender::Male, &m), None);
    }

    #[test]
    fn test_pants_tall_adjustment_ceiling() {
        // Chart row 38
        let m = body(90.0, 40.0, 95.0, 120.0, 190.0);
        assert_eq!(pants_size(Gender::Male, &m), PantsSize(40));
        // Chart row 40
        let m = body(90.0, 40.0, 100.0, 125.0, 190.0);
        assert_eq!(pants_size(Gender::Male, &m), PantsSize(40));
        // Chart row 42
        let m = body(90.0, 40.0, 105.0, 130.0, 190.0);
        assert_eq!(pants_size(Gender::Male, &m), PantsSize(42));
    }

    #[test]
    fn test_pants_no_adjustment_for_women() {
        let m = body(90.0, 40.0, 70.0, 95.0, 190.0);
        assert_eq!(pants_size(Gender::Female, &m), PantsSize(28));
    }

    #[test]
    fn test_pants_fallback_last_row() {
        let m = body(90.0, 40.0, 150.0, 160.0, 170.0);
        assert_eq!(pants_size(Gender::Male, &m), PantsSize(42));
        assert_eq!(pants_size(Gender::Female, &m), PantsSize(38));
    }

    #[test]
    fn test_classify_subsets() {
        let metadata = SubjectMetadata::new(0, 175.0, 75.0).unwrap();
        let m = body(100.0, 44.0, 84.0, 110.0, 175.0);

        let result = classify(&metadata, ApparelType::Tshirt, &m);
        assert_eq!(result.tshirt_size().map(|s| s.to_string()).as_deref(), Some("M"));
        assert_eq!(result.pants_size(), None);
        assert_eq!(result.measurements().len(), UPPER_BODY.len());

        let result = classify(&metadata, ApparelType::Pants, &m);
        assert_eq!(result.pants_size(), Some(PantsSize(34)));
        assert_eq!(result.measurements().len(), LOWER_BODY.len());

        let result = classify(&metadata, ApparelType::All, &m);
        assert!(result.tshirt_size().is_some());
        assert!(result.pants_size().is_some());
        assert_eq!(result.measurements().len(), MEASUREMENT_COUNT);
    }
}
