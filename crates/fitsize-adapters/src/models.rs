//! Model weight store and downloader.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// Model metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    /// Model name/identifier.
    pub name: &'static str,
    /// Filename in models directory.
    pub filename: &'static str,
    /// What the model does.
    pub description: &'static str,
}

/// Person segmentation weights.
pub const SEGMENTATION_MODEL: ModelInfo = ModelInfo {
    name: "segmentation",
    filename: "segmentation.safetensors",
    description: "person/background matte",
};

/// Body measurement regression weights.
pub const MEASUREMENT_MODEL: ModelInfo = ModelInfo {
    name: "measurement",
    filename: "measurement.safetensors",
    description: "14-value body measurement regressor",
};

/// Known models.
pub const MODELS: &[ModelInfo] = &[SEGMENTATION_MODEL, MEASUREMENT_MODEL];

/// Read buffer size for downloads.
const CHUNK_SIZE: usize = 64 * 1024;

/// Returns the default models directory path.
///
/// Uses `XDG_DATA_HOME/fitsize/models` or `~/.local/share/fitsize/models`.
#[must_use]
pub fn default_models_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fitsize")
        .join("models")
}

/// Where model weights come from.
#[derive(Debug, Clone, Default)]
pub struct ModelSource {
    /// Base URL; each model is fetched from `<base_url>/<filename>`.
    pub base_url: String,
    /// Expected SHA-256 per model name. Models without an entry are not verified.
    pub checksums: BTreeMap<String, String>,
}

impl ModelSource {
    /// Creates a source without checksums.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            checksums: BTreeMap::new(),
        }
    }

    /// Adds expected checksums.
    #[must_use]
    pub fn with_checksums(mut self, checksums: BTreeMap<String, String>) -> Self {
        self.checksums = checksums;
        self
    }

    /// Download URL for one model.
    #[must_use]
    pub fn url_for(&self, model: &ModelInfo) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), model.filename)
    }
}

/// Download progress notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    /// A download began; `total` is the content length when known.
    Started {
        /// Model name.
        name: &'static str,
        /// Expected size in bytes.
        total: Option<u64>,
    },
    /// Bytes received so far.
    Progress {
        /// Model name.
        name: &'static str,
        /// Bytes received.
        downloaded: u64,
    },
    /// A download completed and was written to disk.
    Finished {
        /// Model name.
        name: &'static str,
        /// Final size in bytes.
        bytes: u64,
    },
    /// The model was already present.
    Skipped {
        /// Model name.
        name: &'static str,
    },
}

/// Status of one model in a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStatus {
    /// The model.
    pub model: ModelInfo,
    /// Resolved weight file path.
    pub path: PathBuf,
    /// Whether the file exists.
    pub installed: bool,
}

/// A directory holding model weights.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Creates a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a store at `dir`, or the default directory when `None`.
    #[must_use]
    pub fn with_override(dir: Option<PathBuf>) -> Self {
        Self::new(dir.unwrap_or_else(default_models_dir))
    }

    /// Store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a model's weight file.
    #[must_use]
    pub fn path(&self, model: &ModelInfo) -> PathBuf {
        self.dir.join(model.filename)
    }

    /// Returns the path to a model file by name.
    #[must_use]
    pub fn model_path(&self, name: &str) -> Option<PathBuf> {
        MODELS.iter().find(|m| m.name == name).map(|m| self.path(m))
    }

    /// Checks if all models are installed.
    #[must_use]
    pub fn all_installed(&self) -> bool {
        MODELS.iter().all(|m| self.path(m).exists())
    }

    /// Lists models with their status.
    #[must_use]
    pub fn list(&self) -> Vec<ModelStatus> {
        MODELS
            .iter()
            .map(|m| {
                let path = self.path(m);
                ModelStatus {
                    model: *m,
                    installed: path.exists(),
                    path,
                }
            })
            .collect()
    }

    /// Ensures all models are present, downloading missing ones.
    ///
    /// With `force`, existing files are downloaded again.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The models directory cannot be created
    /// - A model download fails
    /// - A model's checksum doesn't match
    pub fn ensure(
        &self,
        source: &ModelSource,
        force: bool,
        mut on_event: impl FnMut(DownloadEvent),
    ) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create models directory {}", self.dir.display())
        })?;

        for model in MODELS {
            let path = self.path(model);
            if path.exists() && !force {
                debug!("Model {} already exists", model.name);
                on_event(DownloadEvent::Skipped { name: model.name });
                continue;
            }
            download_model(model, source, &path, &mut on_event)?;
        }

        Ok(())
    }
}

/// Downloads one model and writes it after verification.
fn download_model(
    model: &ModelInfo,
    source: &ModelSource,
    path: &Path,
    on_event: &mut impl FnMut(DownloadEvent),
) -> Result<()> {
    let url = source.url_for(model);
    info!("Downloading model {} from {url}", model.name);

    let mut response = reqwest::blocking::get(&url)
        .with_context(|| format!("Failed to download {}", model.name))?;

    if !response.status().is_success() {
        anyhow::bail!(
            "Download of {} failed with status: {}",
            model.name,
            response.status()
        );
    }

    let total = response.content_length();
    on_event(DownloadEvent::Started {
        name: model.name,
        total,
    });

    let mut bytes = Vec::with_capacity(total.map_or(0, |t| usize::try_from(t).unwrap_or(0)));
    let mut chunk = vec![0; CHUNK_SIZE];
    loop {
        let n = response
            .read(&mut chunk)
            .with_context(|| format!("Failed to read response for {}", model.name))?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        on_event(DownloadEvent::Progress {
            name: model.name,
            downloaded: bytes.len() as u64,
        });
    }

    match source.checksums.get(model.name) {
        Some(expected) => verify_checksum(&bytes, expected).with_context(|| {
            format!(
                "Checksum mismatch for {}. Delete {} and re-run to download a fresh copy",
                model.name,
                path.display()
            )
        })?,
        None => debug!("No checksum configured for {}, skipping verification", model.name),
    }

    fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Downloaded {} ({} bytes)", model.name, bytes.len());
    on_event(DownloadEvent::Finished {
        name: model.name,
        bytes: bytes.len() as u64,
    });
    Ok(())
}

/// Returns the lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Checks `bytes` against an expected hex digest (case-insensitive).
///
/// # Errors
///
/// Returns an error naming both digests when they differ.
pub fn verify_checksum(bytes: &[u8], expected: &str) -> Result<()> {
    let actual = sha256_hex(bytes);
    if actual.eq_ignore_ascii_case(expected.trim()) {
        Ok(())
    } else {
        anyhow::bail!("expected {}, got {actual}", expected.trim())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_models_dir() {
        assert!(default_models_dir().ends_with("fitsize/models"));
    }

    #[test]
    fn test_model_path() {
        let store = ModelStore::new("/opt/weights");
        let path = store.model_path("segmentation").unwrap();
        assert_eq!(path, PathBuf::from("/opt/weights/segmentation.safetensors"));
        assert!(store.model_path("unknown").is_none());
    }

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let source = ModelSource::new("https://weights.internal/fitsize/");
        assert_eq!(
            source.url_for(&MEASUREMENT_MODEL),
            "https://weights.internal/fitsize/measurement.safetensors"
        );
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify_checksum() {
        let digest = sha256_hex(b"weights");
        assert!(verify_checksum(b"weights", &digest).is_ok());
        assert!(verify_checksum(b"weights", &digest.to_uppercase()).is_ok());

        let err = verify_checksum(b"tampered", &digest).unwrap_err();
        assert!(err.to_string().contains(&digest));
    }
}
