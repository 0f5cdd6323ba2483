//! Models command - manage ML models.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use fitsize_adapters::{
    DownloadEvent, ModelInfo, ModelSource, ModelStore, MEASUREMENT_MODEL, SEGMENTATION_MODEL,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::config::AppConfig;

/// Arguments for the models command
#[derive(Args)]
pub struct ModelsArgs {
    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR", global = true)]
    pub models_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ModelsCommand,
}

/// Models subcommands
#[derive(Subcommand)]
pub enum ModelsCommand {
    /// Download required models
    Fetch {
        /// Base URL to download from (overrides config)
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// Download again even if present
        #[arg(long)]
        force: bool,
    },
    /// List installed models
    List,
    /// Print model directory path
    Path,
}

/// Resolved weight files for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightPaths {
    /// Segmentation network weights.
    pub segmentation: PathBuf,
    /// Measurement regressor weights.
    pub measurement: PathBuf,
}

impl WeightPaths {
    /// Resolves weight files: explicit config paths first, then the store.
    pub fn resolve(config: &AppConfig, models_dir: Option<PathBuf>) -> Self {
        let store = store_for(config, models_dir);
        Self {
            segmentation: config
                .models
                .segmentation
                .clone()
                .unwrap_or_else(|| store.path(&SEGMENTATION_MODEL)),
            measurement: config
                .models
                .measurement
                .clone()
                .unwrap_or_else(|| store.path(&MEASUREMENT_MODEL)),
        }
    }

    /// Fails with a fetch hint if any file is missing.
    pub fn ensure_present(&self) -> Result<()> {
        for (model, path) in [
            (&SEGMENTATION_MODEL, &self.segmentation),
            (&MEASUREMENT_MODEL, &self.measurement),
        ] {
            if !path.exists() {
                anyhow::bail!(
                    "{} model not found at {}. Run `fitsize models fetch`.",
                    model.name,
                    path.display()
                );
            }
        }
        Ok(())
    }
}

/// Models directory: CLI > config > default.
fn store_for(config: &AppConfig, models_dir: Option<PathBuf>) -> ModelStore {
    ModelStore::with_override(models_dir.or_else(|| config.models.dir.clone()))
}

/// Run the models command.
pub fn run(args: &ModelsArgs, config: &AppConfig) -> Result<()> {
    let store = store_for(config, args.models_dir.clone());
    match args.command {
        ModelsCommand::Fetch {
            ref base_url,
            force,
        } => fetch_models(&store, config, base_url.clone(), force),
        ModelsCommand::List => {
            list_models(&store);
            Ok(())
        }
        ModelsCommand::Path => {
            println!("{}", store.dir().display());
            Ok(())
        }
    }
}

fn fetch_models(
    store: &ModelStore,
    config: &AppConfig,
    base_url: Option<String>,
    force: bool,
) -> Result<()> {
    let base_url = base_url
        .or_else(|| config.models.base_url.clone())
        .context("No download URL configured. Pass --base-url or set models.base_url")?;
    let source = ModelSource::new(base_url).with_checksums(config.models.sha256.clone());
    debug!("Fetching models into {}", store.dir().display());

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}")
            .map_err(|e| anyhow::anyhow!("Invalid progress template: {e}"))?
            .progress_chars("#>-"),
    );

    store.ensure(&source, force, |event| match event {
        DownloadEvent::Started { name, total } => {
            pb.reset();
            pb.set_length(total.unwrap_or(0));
            pb.set_message(name);
        }
        DownloadEvent::Progress { downloaded, .. } => pb.set_position(downloaded),
        DownloadEvent::Finished { name, bytes } => {
            pb.println(format!("  ✓ {name} ({bytes} bytes)"));
        }
        DownloadEvent::Skipped { name } => {
            pb.println(format!("  ✓ {name} (already installed)"));
        }
    })?;

    pb.finish_with_message("All models downloaded");
    Ok(())
}

fn list_models(store: &ModelStore) {
    let models = store.list();

    println!("Models directory: {}", store.dir().display());
    println!();

    for status in &models {
        let mark = if status.installed { "✓" } else { "✗" };
        let ModelInfo {
            name,
            filename,
            description,
        } = status.model;
        println!("  {mark} {name} ({filename}) - {description}");
    }

    println!();
    let installed_count = models.iter().filter(|s| s.installed).count();
    println!("{}/{} models installed", installed_count, models.len());
}
