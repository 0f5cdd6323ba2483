//! CLI command definitions and handlers.

pub mod charts;
pub mod classify;
pub mod estimate;
pub mod models;

use clap::{Parser, Subcommand};

/// fitsize - Body measurements and clothing sizes from two photos
#[derive(Parser)]
#[command(name = "fitsize")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Estimate measurements and sizes from a front and a side photo
    Estimate(estimate::EstimateArgs),
    /// Classify sizes from an existing measurement file
    Classify(classify::ClassifyArgs),
    /// Print the size charts
    Charts(charts::ChartsArgs),
    /// Manage ML models
    Models(models::ModelsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Request completed.
    Success = 0,
    /// The request was rejected: bad value, unsupported file type.
    InvalidInput = 1,
    /// Anything else: unreadable photo, missing model, prediction failure.
    Error = 2,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<fitsize_core::Error>() {
            Some(e) if e.is_validation() => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
