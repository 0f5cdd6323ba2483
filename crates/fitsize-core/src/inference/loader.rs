//! Model loading utilities for safetensors format.

use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use safetensors::SafeTensors;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Loads a safetensors file and creates a `VarBuilder` for a model.
///
/// # Arguments
///
/// * `path` - Path to the safetensors file
/// * `device` - Device to load tensors onto
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The safetensors data is invalid
/// - A tensor uses an unsupported dtype
pub fn load_safetensors(path: impl AsRef<Path>, device: &Device) -> Result<VarBuilder<'static>> {
    let path = path.as_ref();
    debug!("Loading safetensors from {}", path.display());

    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read model file: {}", path.display()))?;

    let tensors = SafeTensors::deserialize(&data)
        .with_context(|| format!("Failed to parse safetensors: {}", path.display()))?;

    let mut tensor_map: HashMap<String, Tensor> = HashMap::new();

    for name in tensors.names() {
        let tensor_view = tensors
            .tensor(name)
            .with_context(|| format!("Failed to get tensor '{name}'"))?;

        let dtype = safetensors_dtype_to_candle(tensor_view.dtype())?;
        let shape: Vec<usize> = tensor_view.shape().to_vec();

        let tensor = Tensor::from_raw_buffer(tensor_view.data(), dtype, &shape, device)
            .with_context(|| format!("Failed to create tensor '{name}'"))?
            .to_dtype(DType::F32)
            .with_context(|| format!("Failed to convert tensor '{name}' to f32"))?;

        tensor_map.insert(name.clone(), tensor);
    }

    debug!("Loaded {} tensors from {}", tensor_map.len(), path.display());
    Ok(VarBuilder::from_tensors(tensor_map, DType::F32, device))
}

/// Converts safetensors dtype to candle dtype.
fn safetensors_dtype_to_candle(dtype: safetensors::Dtype) -> Result<DType> {
    use safetensors::Dtype as S;
    match dtype {
        S::F32 => Ok(DType::F32),
        S::F64 => Ok(DType::F64),
        S::F16 => Ok(DType::F16),
        S::BF16 => Ok(DType::BF16),
        other => anyhow::bail!("Unsupported weight dtype: {other:?}"),
    }
}
