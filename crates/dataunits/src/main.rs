//! Dataunits CLI binary.

use std::process::ExitCode;

use colored::Colorize;
use dataunits::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the dataunits CLI.
///
/// Uses tokio's current_thread runtime; the only I/O is reading a snapshot
/// and an optional configuration file.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Can be overridden via RUST_LOG, e.g. RUST_LOG=dataunits=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting dataunits CLI");

    match cli.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e:#}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}
