//! gcsu - Google Cloud Storage file manager
//!
//! A command-line interface to list, upload, download and rename objects
//! in a single Cloud Storage bucket.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use gcsu_cli::commands::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("gcsu=debug,gcsu_cli=debug,gcsu_core=debug,gcsu_gcs=debug")
    } else {
        EnvFilter::from_default_env()
    };

    // Logs go to stderr so they never mix with command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
