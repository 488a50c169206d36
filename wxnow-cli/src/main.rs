//! Binary crate for the `wxnow` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive menu
//! - Mapping failures to a message and exit status 1

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
