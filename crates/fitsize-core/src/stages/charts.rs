//! Static apparel size charts.
//!
//! Rows are ordered from smallest to largest size. A subject fits a row
//! when both of its measurements are at or below the row's maxima.

use serde::Serialize;

use crate::domain::Gender;

/// A row that bounds two measurements.
pub trait ChartRow {
    /// The size this row assigns.
    type Size: Copy;

    /// Upper bounds `(primary, secondary)` in centimeters.
    fn bounds(&self) -> (f64, f64);

    /// Size assigned by this row.
    fn size(&self) -> Self::Size;
}

/// One t-shirt chart row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TshirtRow {
    /// Largest chest circumference for this size.
    pub max_chest_cm: f64,
    /// Largest shoulder breadth for this size.
    pub max_shoulder_breadth_cm: f64,
    /// Size label.
    pub label: &'static str,
}

/// One pants chart row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PantsRow {
    /// Largest waist circumference for this size.
    pub max_waist_cm: f64,
    /// Largest hip circumference for this size.
    pub max_hip_cm: f64,
    /// Numeric size.
    pub size: u8,
}

impl ChartRow for TshirtRow {
    type Size = &'static str;

    fn bounds(&self) -> (f64, f64) {
        (self.max_chest_cm, self.max_shoulder_breadth_cm)
    }

    fn size(&self) -> Self::Size {
        self.label
    }
}

impl ChartRow for PantsRow {
    type Size = u8;

    fn bounds(&self) -> (f64, f64) {
        (self.max_waist_cm, self.max_hip_cm)
    }

    fn size(&self) -> Self::Size {
        self.size
    }
}

/// T-shirt and pants charts for one gender.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SizeChart {
    /// Gender the chart applies to.
    pub gender: Gender,
    /// T-shirt rows, smallest first.
    pub tshirt: &'static [TshirtRow],
    /// Pants rows, smallest first.
    pub pants: &'static [PantsRow],
}

const fn tshirt(max_chest_cm: f64, max_shoulder_breadth_cm: f64, label: &'static str) -> TshirtRow {
    TshirtRow {
        max_chest_cm,
        max_shoulder_breadth_cm,
        label,
    }
}

const fn pants(max_waist_cm: f64, max_hip_cm: f64, size: u8) -> PantsRow {
    PantsRow {
        max_waist_cm,
        max_hip_cm,
        size,
    }
}

/// Men's sizes.
pub static MALE_CHART: SizeChart = SizeChart {
    gender: Gender::Male,
    tshirt: &[
        tshirt(97.0, 42.0, "S"),
        tshirt(104.0, 45.0, "M"),
        tshirt(112.0, 48.0, "L"),
        tshirt(120.0, 51.0, "XL"),
        tshirt(128.0, 54.0, "XXL"),
        tshirt(136.0, 57.0, "XXXL"),
    ],
    pants: &[
        pants(76.0, 102.0, 30),
        pants(81.0, 107.0, 32),
        pants(86.0, 112.0, 34),
        pants(91.0, 117.0, 36),
        pants(97.0, 122.0, 38),
        pants(102.0, 127.0, 40),
        pants(107.0, 132.0, 42),
    ],
};

/// Women's sizes.
pub static FEMALE_CHART: SizeChart = SizeChart {
    gender: Gender::Female,
    tshirt: &[
        tshirt(89.0, 38.0, "S"),
        tshirt(96.0, 41.0, "M"),
        tshirt(104.0, 44.0, "L"),
        tshirt(112.0, 47.0, "XL"),
        tshirt(120.0, 50.0, "XXL"),
        tshirt(128.0, 53.0, "XXXL"),
    ],
    pants: &[
        pants(66.0, 92.0, 26),
        pants(71.0, 97.0, 28),
        pants(76.0, 102.0, 30),
        pants(81.0, 107.0, 32),
        pants(86.0, 112.0, 34),
        pants(91.0, 117.0, 36),
        pants(97.0, 122.0, 38),
    ],
};

/// Returns the chart for a gender.
#[must_use]
pub fn chart_for(gender: Gender) -> &'static SizeChart {
    match gender {
        Gender::Male => &MALE_CHART,
        Gender::Female => &FEMALE_CHART,
    }
}

/// Finds the first row bounding both measurements.
///
/// Returns the row index and its size, or `None` when the subject exceeds
/// every row.
#[must_use]
pub fn first_fit<R: ChartRow>(rows: &[R], primary: f64, secondary: f64) -> Option<(usize, R::Size)> {
    rows.iter().enumerate().find_map(|(i, row)| {
        let (max_primary, max_secondary) = row.bounds();
        (primary <= max_primary && secondary <= max_secondary).then(|| (i, row.size()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charts_ascending() {
        for chart in [&MALE_CHART, &FEMALE_CHART] {
            for pair in chart.tshirt.windows(2) {
                assert!(pair[0].max_chest_cm < pair[1].max_chest_cm);
                assert!(pair[0].max_shoulder_breadth_cm < pair[1].max_shoulder_breadth_cm);
            }
            for pair in chart.pants.windows(2) {
                assert!(pair[0].max_waist_cm < pair[1].max_waist_cm);
                assert!(pair[0].size < pair[1].size);
            }
            assert_eq!(chart.tshirt.last().map(|r| r.label), Some("XXXL"));
        }
    }

    #[test]
    fn test_chart_for_gender() {
        assert_eq!(chart_for(Gender::Male).gender, Gender::Male);
        assert_eq!(chart_for(Gender::Female).pants[0].size, 26);
    }

    #[test]
    fn test_first_fit_requires_both_bounds() {
        // Chest fits S but shoulders need M
        assert_eq!(first_fit(MALE_CHART.tshirt, 95.0, 44.0), Some((1, "M")));
        // Exactly on the bound still fits
        assert_eq!(first_fit(MALE_CHART.tshirt, 97.0, 42.0), Some((0, "S")));
        assert_eq!(first_fit(MALE_CHART.tshirt, 140.0, 40.0), None);
    }
}
