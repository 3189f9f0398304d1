//! apkgrant - Main entry point.
//!
//! Pulls every third-party APK from a connected Android device, reads the
//! permissions each one declares and grants them all.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use apkgrant_cli::cli::{Cli, LogLevel};
use apkgrant_cli::{PipelineError, run};

/// Diagnostics go to stderr; stdout is reserved for the operator transcript.
fn init_logging(level: LogLevel) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level.as_filter_str())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    if let Err(err) = apkgrant_common::install_interrupt_handler() {
        tracing::warn!(error = %err, "Could not install Ctrl+C handler");
    }

    match run(cli.run_options()) {
        Ok(summary) => {
            tracing::debug!(
                device = %summary.device.serial,
                granted = summary.granted_packages(),
                skipped = summary.skipped_packages(),
                interrupted = summary.interrupted_packages(),
                "Run complete"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(PipelineError::Io(err)) => Err(err).context("Failed to talk to the terminal"),
        Err(err) => {
            println!("{err}");
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}
