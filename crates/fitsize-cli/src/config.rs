//! Configuration file support for fitsize.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/fitsize/config.toml` (lowest priority)
//! - Project-local: `.fitsize.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fitsize_core::ApparelType;
use serde::Deserialize;
use tracing::{debug, info};

/// Project-local config file name.
const PROJECT_CONFIG: &str = ".fitsize.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model settings.
    pub models: ModelsConfig,
    /// Estimation defaults.
    pub estimate: EstimateConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// Model configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Custom models directory path.
    pub dir: Option<PathBuf>,
    /// Base URL model files are downloaded from.
    pub base_url: Option<String>,
    /// Explicit segmentation weight file, bypassing the models directory.
    pub segmentation: Option<PathBuf>,
    /// Explicit measurement weight file, bypassing the models directory.
    pub measurement: Option<PathBuf>,
    /// Expected SHA-256 per model name.
    pub sha256: BTreeMap<String, String>,
}

/// Estimation defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct EstimateConfig {
    /// Default apparel type: "tshirt", "pants" or "all".
    pub apparel: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/fitsize/config.toml`
    /// 2. Project-local: `.fitsize.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), String> {
        if let Some(ref apparel) = self.estimate.apparel {
            if apparel.parse::<ApparelType>().is_err() {
                return Err(format!(
                    "estimate.apparel must be one of {}, got '{apparel}'",
                    ApparelType::NAMES.join("/")
                ));
            }
        }

        if let Some(ref url) = self.models.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!(
                    "models.base_url must start with http:// or https://, got '{url}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Models
        self.models.dir = other.models.dir.or_else(|| self.models.dir.take());
        self.models.base_url = other
            .models
            .base_url
            .or_else(|| self.models.base_url.take());
        self.models.segmentation = other
            .models
            .segmentation
            .or_else(|| self.models.segmentation.take());
        self.models.measurement = other
            .models
            .measurement
            .or_else(|| self.models.measurement.take());
        // Checksums merge per key
        self.models.sha256.extend(other.models.sha256);

        // Estimate
        self.estimate.apparel = other
            .estimate
            .apparel
            .or_else(|| self.estimate.apparel.take());

        // Output
        self.output.pretty = other.output.pretty.or(self.output.pretty);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("fitsize").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.fitsize.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
