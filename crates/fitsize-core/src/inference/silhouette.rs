//! Silhouette segmentation network.
//!
//! A compact U-Net style saliency model in the spirit of U²-Net / IS-Net:
//! four encoder levels, three decoder levels with skip connections, and a
//! single-channel sigmoid head. The mask is min-max normalized and used as
//! the alpha channel of the source photo.

// Allow common ML code patterns
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

use std::path::Path;

use anyhow::{Context, Result};
use candle_core::{Device, Module, Tensor};
use candle_nn::{conv2d, Conv2d, Conv2dConfig, VarBuilder};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, RgbaImage};
use tracing::{debug, info};

use super::load_safetensors;
use crate::ports::Segmenter;

/// Input edge length for the segmentation network.
pub const SEGMENTATION_INPUT_SIZE: usize = 320;

/// ImageNet channel means.
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
/// ImageNet channel standard deviations.
const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Below this spread the raw probabilities are used as-is.
const MIN_MASK_RANGE: f32 = 1e-6;

fn conv3x3(in_channels: usize, out_channels: usize, vb: VarBuilder) -> candle_core::Result<Conv2d> {
    conv2d(
        in_channels,
        out_channels,
        3,
        Conv2dConfig {
            padding: 1,
            ..Conv2dConfig::default()
        },
        vb,
    )
}

/// Foreground segmentation model.
///
/// Input: `(1, 3, 320, 320)` ImageNet-normalized RGB.
/// Output: `(1, 1, 320, 320)` foreground logits.
pub struct SilhouetteSegmenter {
    enc1: Conv2d,
    enc2: Conv2d,
    enc3: Conv2d,
    bottleneck: Conv2d,
    dec3: Conv2d,
    dec2: Conv2d,
    dec1: Conv2d,
    head: Conv2d,
    device: Device,
}

impl SilhouetteSegmenter {
    /// Creates the segmenter from weights.
    ///
    /// # Errors
    ///
    /// Returns an error if model weights cannot be loaded or are invalid.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(vb: VarBuilder) -> Result<Self> {
        let device = vb.device().clone();

        // Encoder: 320 -> 160 -> 80 -> 40
        let enc1 = conv3x3(3, 16, vb.pp("enc1"))?;
        let enc2 = conv3x3(16, 32, vb.pp("enc2"))?;
        let enc3 = conv3x3(32, 64, vb.pp("enc3"))?;
        let bottleneck = conv3x3(64, 64, vb.pp("bottleneck"))?;

        // Decoder inputs are upsampled features concatenated with the skip
        let dec3 = conv3x3(64 + 64, 32, vb.pp("dec3"))?;
        let dec2 = conv3x3(32 + 32, 16, vb.pp("dec2"))?;
        let dec1 = conv3x3(16 + 16, 16, vb.pp("dec1"))?;

        let head = conv2d(16, 1, 1, Conv2dConfig::default(), vb.pp("head"))?;

        Ok(Self {
            enc1,
            enc2,
            enc3,
            bottleneck,
            dec3,
            dec2,
            dec1,
            head,
            device,
        })
    }

    /// Loads the segmenter from a safetensors file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match the architecture.
    pub fn load(path: impl AsRef<Path>, device: &Device) -> Result<Self> {
        let path = path.as_ref();
        let vb = load_safetensors(path, device).context("Failed to load segmentation weights")?;
        let model = Self::new(vb).context("Failed to create segmentation model")?;
        info!("Segmentation model loaded from {}", path.display());
        Ok(model)
    }

    /// Preprocesses a photo for the network.
    ///
    /// # Returns
    ///
    /// Tensor of shape `(1, 3, 320, 320)` in channel-first order.
    ///
    /// # Errors
    ///
    /// Returns an error if tensor creation fails.
    pub fn preprocess(&self, image: &DynamicImage) -> Result<Tensor> {
        let n = SEGMENTATION_INPUT_SIZE;
        let resized = image
            .resize_exact(n as u32, n as u32, FilterType::Lanczos3)
            .to_rgb8();

        let mut data = vec![0f32; 3 * n * n];
        for (x, y, pixel) in resized.enumerate_pixels() {
            let offset = y as usize * n + x as usize;
            for c in 0..3 {
                data[c * n * n + offset] = (f32::from(pixel[c]) / 255.0 - MEAN[c]) / STD[c];
            }
        }

        Tensor::from_vec(data, (1, 3, n, n), &self.device)
            .context("Failed to create segmentation input tensor")
    }

    /// Predicts the foreground mask at the photo's original size.
    ///
    /// # Errors
    ///
    /// Returns an error if preprocessing or inference fails.
    pub fn predict_mask(&self, image: &DynamicImage) -> Result<GrayImage> {
        let n = SEGMENTATION_INPUT_SIZE;
        let input = self.preprocess(image)?;
        let logits = self.forward(&input).context("Segmentation forward pass failed")?;
        let probs = candle_nn::ops::sigmoid(&logits)?
            .flatten_all()?
            .to_vec1::<f32>()?;

        let (min, max) = probs
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let range = max - min;
        debug!("Mask probabilities in [{min:.3}, {max:.3}]");

        let mask = GrayImage::from_fn(n as u32, n as u32, |x, y| {
            let v = probs[y as usize * n + x as usize];
            let v = if range > MIN_MASK_RANGE {
                (v - min) / range
            } else {
                v
            };
            Luma([(v * 255.0).round().clamp(0.0, 255.0) as u8])
        });

        Ok(imageops::resize(
            &mask,
            image.width(),
            image.height(),
            FilterType::Lanczos3,
        ))
    }
}

impl Module for SilhouetteSegmenter {
    fn forward(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        let e1 = self.enc1.forward(x)?.relu()?;
        let e2 = self.enc2.forward(&e1.max_pool2d(2)?)?.relu()?;
        let e3 = self.enc3.forward(&e2.max_pool2d(2)?)?.relu()?;
        let b = self.bottleneck.forward(&e3.max_pool2d(2)?)?.relu()?;

        let d3 = self.dec3.forward(&up_cat(&b, &e3)?)?.relu()?;
        let d2 = self.dec2.forward(&up_cat(&d3, &e2)?)?.relu()?;
        let d1 = self.dec1.forward(&up_cat(&d2, &e1)?)?.relu()?;

        self.head.forward(&d1)
    }
}

/// Upsamples `x` to the spatial size of `skip` and concatenates channels.
fn up_cat(x: &Tensor, skip: &Tensor) -> candle_core::Result<Tensor> {
    let (_, _, h, w) = skip.dims4()?;
    let up = x.upsample_nearest2d(h, w)?;
    Tensor::cat(&[&up, skip], 1)
}

impl Segmenter for SilhouetteSegmenter {
    fn name(&self) -> &'static str {
        "silhouette-net"
    }

    fn segment(&self, image: &DynamicImage) -> Result<RgbaImage> {
        let mask = self.predict_mask(image)?;
        let mut cutout = image.to_rgba8();
        for (pixel, alpha) in cutout.pixels_mut().zip(mask.pixels()) {
            pixel[3] = alpha[0];
        }
        Ok(cutout)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use candle_core::DType;

    fn zero_model() -> SilhouetteSegmenter {
        let vb = VarBuilder::zeros(DType::F32, &Device::Cpu);
        SilhouetteSegmenter::new(vb).unwrap()
    }

    #[test]
    fn test_input_size_divisible_by_pooling() {
        // Three 2x2 pools: 320 -> 160 -> 80 -> 40
        assert_eq!(SEGMENTATION_INPUT_SIZE % 8, 0);
    }

    #[test]
    fn test_preprocess_shape() {
        let model = zero_model();
        let image = DynamicImage::new_rgb8(50, 80);
        let tensor = model.preprocess(&image).unwrap();
        assert_eq!(tensor.dims(), &[1, 3, 320, 320]);
    }

    #[test]
    fn test_segment_keeps_source_size() {
        let model = zero_model();
        let image = DynamicImage::new_rgb8(40, 30);
        let cutout = model.segment(&image).unwrap();
        assert_eq!(cutout.dimensions(), (40, 30));

        // Zero weights give a flat 0.5 probability
        assert!(cutout.pixels().all(|p| (120..=135).contains(&p[3])));
    }
}
