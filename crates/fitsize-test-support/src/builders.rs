//! Synthetic photo and measurement builders for testing.

use std::io::Cursor;

use fitsize_core::domain::{Measurement, MeasurementSet, RawImage, MEASUREMENT_COUNT};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// Background color of synthetic photos.
const BACKDROP: Rgb<u8> = Rgb([20, 24, 28]);
/// Subject color of synthetic photos.
const SUBJECT: Rgb<u8> = Rgb([235, 230, 220]);

/// Builder for creating synthetic test photos.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    /// Creates a bright standing figure (head and torso) on a dark backdrop.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn silhouette(width: u32, height: u32) -> DynamicImage {
        let cx = f64::from(width) / 2.0;
        let head_cy = f64::from(height) * 0.15;
        let head_r = f64::from(width.min(height)) * 0.1;
        let torso_half = f64::from(width) * 0.2;
        let torso_top = f64::from(height) * 0.25;
        let torso_bottom = f64::from(height) * 0.95;

        let img = RgbImage::from_fn(width, height, |x, y| {
            let (fx, fy) = (f64::from(x), f64::from(y));
            let in_head = (fx - cx).hypot(fy - head_cy) <= head_r;
            let in_torso = (fx - cx).abs() <= torso_half && (torso_top..=torso_bottom).contains(&fy);
            if in_head || in_torso {
                SUBJECT
            } else {
                BACKDROP
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    /// Creates a uniformly colored photo.
    #[must_use]
    pub fn uniform(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([value; 3])))
    }

    /// Encodes a synthetic figure as PNG.
    #[must_use]
    pub fn silhouette_png(width: u32, height: u32) -> RawImage {
        RawImage::new(Self::encode(&Self::silhouette(width, height), ImageFormat::Png))
    }

    /// Encodes a synthetic figure as JPEG.
    #[must_use]
    pub fn silhouette_jpeg(width: u32, height: u32) -> RawImage {
        RawImage::new(Self::encode(&Self::silhouette(width, height), ImageFormat::Jpeg))
    }

    /// Encodes an image in memory.
    ///
    /// # Panics
    ///
    /// Panics if the encoder rejects the image.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image
            .write_to(&mut buf, format)
            .expect("in-memory encoding succeeds");
        buf.into_inner()
    }
}

/// Builder for measurement sets with typical adult defaults.
#[derive(Debug, Clone)]
pub struct MeasurementSetBuilder {
    values: [f64; MEASUREMENT_COUNT],
}

impl MeasurementSetBuilder {
    /// Starts from a medium-build adult, 175 cm tall.
    #[must_use]
    pub fn new() -> Self {
        let mut builder = Self {
            values: [0.0; MEASUREMENT_COUNT],
        };
        for (m, v) in [
            (Measurement::Ankle, 23.0),
            (Measurement::ArmLength, 60.0),
            (Measurement::Bicep, 31.0),
            (Measurement::Calf, 37.0),
            (Measurement::Chest, 98.0),
            (Measurement::Forearm, 27.0),
            (Measurement::Height, 175.0),
            (Measurement::Hip, 100.0),
            (Measurement::LegLength, 80.0),
            (Measurement::ShoulderBreadth, 43.0),
            (Measurement::ShoulderToCrotch, 65.0),
            (Measurement::Thigh, 55.0),
            (Measurement::Waist, 84.0),
            (Measurement::Wrist, 17.0),
        ] {
            builder.values[m.index()] = v;
        }
        builder
    }

    /// Sets any measurement.
    #[must_use]
    pub fn set(mut self, measurement: Measurement, value: f64) -> Self {
        self.values[measurement.index()] = value;
        self
    }

    /// Sets the chest circumference.
    #[must_use]
    pub fn chest(self, value: f64) -> Self {
        self.set(Measurement::Chest, value)
    }

    /// Sets the shoulder breadth.
    #[must_use]
    pub fn shoulder_breadth(self, value: f64) -> Self {
        self.set(Measurement::ShoulderBreadth, value)
    }

    /// Sets the waist circumference.
    #[must_use]
    pub fn waist(self, value: f64) -> Self {
        self.set(Measurement::Waist, value)
    }

    /// Sets the hip circumference.
    #[must_use]
    pub fn hip(self, value: f64) -> Self {
        self.set(Measurement::Hip, value)
    }

    /// Sets the measured height.
    #[must_use]
    pub fn height(self, value: f64) -> Self {
        self.set(Measurement::Height, value)
    }

    /// Builds the measurement set.
    #[must_use]
    pub fn build(&self) -> MeasurementSet {
        MeasurementSet::from_values(self.values)
    }

    /// Returns the values as a raw predictor output vector.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_prediction(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}

impl Default for MeasurementSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
