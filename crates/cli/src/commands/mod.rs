//! CLI command definitions and execution
//!
//! Every command handler returns a typed `Result`; this module turns the
//! outcome into printed output and an exit code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gcsu_core::{ConfigManager, Error, Overrides, Result, Settings};
use gcsu_gcs::GcsClient;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
mod config;
mod download;
mod list;
mod rename;
mod upload;

#[cfg(test)]
mod testing;

/// gcsu - Google Cloud Storage file manager
///
/// List, upload, download and rename objects in a Cloud Storage bucket
/// using a service account key file.
#[derive(Parser, Debug)]
#[command(name = "gcsu")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Bucket to operate on (overrides the configuration file)
    #[arg(long, global = true, env = "GCSU_BUCKET")]
    pub bucket: Option<String>,

    /// Service account key file (overrides the configuration file)
    #[arg(long, global = true, env = "GCSU_CREDENTIALS", value_name = "PATH")]
    pub credentials: Option<PathBuf>,

    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all objects in the bucket
    List(list::ListArgs),

    /// Upload a local file to the bucket
    Upload(upload::UploadArgs),

    /// Download an object from the bucket
    Download(download::DownloadArgs),

    /// Rename an object in the bucket (copy, then delete the original)
    Rename(rename::RenameArgs),

    /// Show or change the saved configuration
    #[command(subcommand)]
    Config(config::ConfigCommands),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let formatter = Formatter::new(OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    });

    let overrides = Overrides {
        bucket: cli.bucket,
        credentials_file: cli.credentials,
    };

    match run(cli.command, &overrides, &formatter).await {
        Ok(()) => ExitCode::Success,
        Err(e) => report_error(&formatter, &e),
    }
}

async fn run(command: Commands, overrides: &Overrides, formatter: &Formatter) -> Result<()> {
    match command {
        Commands::List(args) => list::execute(args, &load_settings(overrides)?, formatter).await,
        Commands::Upload(args) => {
            upload::execute(args, &load_settings(overrides)?, formatter).await
        }
        Commands::Download(args) => {
            download::execute(args, &load_settings(overrides)?, formatter).await
        }
        Commands::Rename(args) => {
            rename::execute(args, &load_settings(overrides)?, formatter).await
        }
        Commands::Config(cmd) => config::execute(cmd, &ConfigManager::new()?, formatter),
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Resolve bucket and credential file before any storage command runs
fn load_settings(overrides: &Overrides) -> Result<Settings> {
    let config = ConfigManager::new()?.load()?;
    let settings = Settings::resolve(&config, overrides)?;
    tracing::debug!(
        bucket = %settings.bucket,
        credentials = %settings.credentials_file.display(),
        "resolved settings"
    );
    Ok(settings)
}

/// Build an authenticated client from the configured key file
async fn connect(settings: &Settings) -> Result<GcsClient> {
    GcsClient::from_credentials_file(&settings.credentials_file).await
}

/// Print an error and pick the matching exit code
fn report_error(formatter: &Formatter, error: &Error) -> ExitCode {
    let code = ExitCode::from_error(error);
    tracing::debug!(?error, exit_code = code.as_i32(), "command failed");
    formatter.error(&error.to_string(), code);
    code
}
