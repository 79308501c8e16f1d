//! Binary crate for the `skyview` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Logging setup
//! - Drawing the weather screen as text

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    init_logging(cmd.verbose);
    cmd.run().await
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn,skyview_core=info,skyview=info",
        1 => "warn,skyview_core=debug,skyview=debug",
        _ => "debug",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
