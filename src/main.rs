//! yweather binary
//!
//! Thin CLI wrapper around the library. Resolves the configuration, runs the
//! pipeline and prints the pipe menu. On failure a single diagnostic line is
//! printed instead of the menu.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use yweather::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // stdout belongs to the menu, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match Cli::parse().into_config() {
        Ok(config) => yweather::run(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(menu) => {
            print!("{menu}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "weather menu failed");
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
