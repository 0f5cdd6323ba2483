//! fitsize CLI - Body measurements and clothing sizes from two photos.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();

    let exit_code = match cli.command {
        Commands::Estimate(ref args) => commands::estimate::run(args, &config),
        Commands::Classify(ref args) => commands::classify::run(args, &config),
        Commands::Charts(ref args) => report(commands::charts::run(args, &config)),
        Commands::Models(ref args) => report(commands::models::run(args, &config)),
    };

    exit_code.into()
}

/// Prints a plain error for commands without a JSON envelope.
fn report(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::for_error(&e)
        }
    }
}
