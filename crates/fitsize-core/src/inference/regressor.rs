//! Body measurement regression network.
//!
//! Two convolutional branches encode the front and side silhouettes, a
//! linear projection encodes the metadata vector, and a dense head regresses
//! the 14 measurements in centimeters.

use std::path::Path;

use anyhow::{Context, Result};
use candle_core::{Device, Module, Tensor, D};
use candle_nn::{conv2d, linear, Conv2d, Conv2dConfig, Linear, VarBuilder};
use tracing::info;

use super::load_safetensors;
use crate::domain::{NormalizedImage, MEASUREMENT_COUNT, NORMALIZED_SIZE};
use crate::ports::MeasurementPredictor;

/// Channels produced by each silhouette branch.
const BRANCH_FEATURES: usize = 64;
/// Width of the metadata projection.
const METADATA_FEATURES: usize = 16;
/// Width of the hidden dense layer.
const HIDDEN_FEATURES: usize = 128;

/// Convolutional encoder for one silhouette view.
struct SilhouetteBranch {
    conv1: Conv2d,
    conv2: Conv2d,
    conv3: Conv2d,
}

impl SilhouetteBranch {
    fn new(vb: &VarBuilder) -> Result<Self> {
        let cfg = Conv2dConfig {
            padding: 1,
            ..Conv2dConfig::default()
        };
        Ok(Self {
            conv1: conv2d(1, 16, 3, cfg, vb.pp("conv1"))?,
            conv2: conv2d(16, 32, 3, cfg, vb.pp("conv2"))?,
            conv3: conv2d(32, BRANCH_FEATURES, 3, cfg, vb.pp("conv3"))?,
        })
    }
}

impl Module for SilhouetteBranch {
    fn forward(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        // 128 -> 64 -> 32 -> 16
        let x = self.conv1.forward(x)?.relu()?.max_pool2d(2)?;
        let x = self.conv2.forward(&x)?.relu()?.max_pool2d(2)?;
        let x = self.conv3.forward(&x)?.relu()?.max_pool2d(2)?;

        // Global average pool to (batch, channels)
        x.mean(D::Minus1)?.mean(D::Minus1)
    }
}

/// Measurement regression model.
///
/// Inputs: front `(1, 1, 128, 128)`, side `(1, 1, 128, 128)`, metadata `(1, 3)`.
/// Output: `(1, 14)` measurements in model output order.
pub struct MeasurementRegressor {
    front: SilhouetteBranch,
    side: SilhouetteBranch,
    metadata: Linear,
    fc1: Linear,
    head: Linear,
    device: Device,
}

impl MeasurementRegressor {
    /// Creates the regressor from weights.
    ///
    /// # Errors
    ///
    /// Returns an error if model weights cannot be loaded or are invalid.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(vb: VarBuilder) -> Result<Self> {
        let device = vb.device().clone();

        let front = SilhouetteBranch::new(&vb.pp("front"))?;
        let side = SilhouetteBranch::new(&vb.pp("side"))?;
        let metadata = linear(3, METADATA_FEATURES, vb.pp("metadata"))?;

        let fused = 2 * BRANCH_FEATURES + METADATA_FEATURES;
        let fc1 = linear(fused, HIDDEN_FEATURES, vb.pp("fc1"))?;
        let head = linear(HIDDEN_FEATURES, MEASUREMENT_COUNT, vb.pp("head"))?;

        Ok(Self {
            front,
            side,
            metadata,
            fc1,
            head,
            device,
        })
    }

    /// Loads the regressor from a safetensors file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match the architecture.
    pub fn load(path: impl AsRef<Path>, device: &Device) -> Result<Self> {
        let path = path.as_ref();
        let vb = load_safetensors(path, device).context("Failed to load measurement weights")?;
        let model = Self::new(vb).context("Failed to create measurement model")?;
        info!("Measurement model loaded from {}", path.display());
        Ok(model)
    }

    /// Runs the network on prepared tensors.
    ///
    /// # Errors
    ///
    /// Returns an error if a tensor has the wrong shape.
    pub fn forward_views(
        &self,
        front: &Tensor,
        side: &Tensor,
        metadata: &Tensor,
    ) -> candle_core::Result<Tensor> {
        let front = self.front.forward(front)?;
        let side = self.side.forward(side)?;
        let metadata = self.metadata.forward(metadata)?.relu()?;

        let fused = Tensor::cat(&[&front, &side, &metadata], 1)?;
        let hidden = self.fc1.forward(&fused)?.relu()?;
        self.head.forward(&hidden)
    }

    fn image_tensor(&self, image: &NormalizedImage) -> Result<Tensor> {
        let size = NORMALIZED_SIZE as usize;
        Tensor::from_vec(image.as_slice().to_vec(), (1, 1, size, size), &self.device)
            .context("Failed to create silhouette tensor")
    }
}

impl MeasurementPredictor for MeasurementRegressor {
    fn name(&self) -> &'static str {
        "measurement-regressor"
    }

    fn predict(
        &self,
        front: &NormalizedImage,
        side: &NormalizedImage,
        metadata: [f32; 3],
    ) -> Result<Vec<f32>> {
        let front = self.image_tensor(front)?;
        let side = self.image_tensor(side)?;
        let metadata = Tensor::from_vec(metadata.to_vec(), (1, 3), &self.device)
            .context("Failed to create metadata tensor")?;

        let output = self
            .forward_views(&front, &side, &metadata)
            .context("Measurement forward pass failed")?;

        output
            .flatten_all()
            .and_then(|t| t.to_vec1::<f32>())
            .context("Failed to read measurement output")
    }
}
