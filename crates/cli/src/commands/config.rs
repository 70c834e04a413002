//! config command - Show or change the saved configuration
//!
//! The saved bucket and credential file are used whenever the --bucket and
//! --credentials flags (or their environment variables) are not given.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use gcsu_core::{Config, ConfigManager, Error, Result};
use serde::Serialize;

use crate::output::Formatter;

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the saved configuration
    Show,

    /// Save a configuration value
    Set {
        /// Key to set
        #[arg(value_enum)]
        key: ConfigKey,

        /// New value
        value: String,
    },

    /// Remove a saved configuration value
    Unset {
        /// Key to remove
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Print the configuration file path
    Path,
}

/// Keys that can be stored in the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Bucket name
    Bucket,
    /// Path to the service account key file
    Credentials,
}

#[derive(Debug, Serialize)]
struct ConfigOutput<'a> {
    path: String,
    #[serde(flatten)]
    config: &'a Config,
}

/// Execute a config subcommand against the given config file
pub fn execute(cmd: ConfigCommands, manager: &ConfigManager, formatter: &Formatter) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = manager.load()?;
            show(&config, manager, formatter);
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let mut config = manager.load()?;
            set_value(&mut config, key, &value, formatter)?;
            manager.save(&config)?;
            formatter.success(&format!(
                "Saved {} to '{}'.",
                key_name(key),
                manager.config_path().display()
            ));
            Ok(())
        }
        ConfigCommands::Unset { key } => {
            let mut config = manager.load()?;
            match key {
                ConfigKey::Bucket => config.bucket = None,
                ConfigKey::Credentials => config.credentials_file = None,
            }
            manager.save(&config)?;
            formatter.success(&format!("Removed {}.", key_name(key)));
            Ok(())
        }
        ConfigCommands::Path => {
            formatter.println(&manager.config_path().display().to_string());
            Ok(())
        }
    }
}

fn key_name(key: ConfigKey) -> &'static str {
    match key {
        ConfigKey::Bucket => "bucket",
        ConfigKey::Credentials => "credentials file",
    }
}

fn set_value(config: &mut Config, key: ConfigKey, value: &str, formatter: &Formatter) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Config(format!("{} cannot be empty", key_name(key))));
    }

    match key {
        ConfigKey::Bucket => config.bucket = Some(value.to_string()),
        ConfigKey::Credentials => {
            // Stored absolute so the tool works from any directory
            let path = std::path::absolute(PathBuf::from(value))?;
            if !path.is_file() {
                formatter.warning(&format!(
                    "Service account key file '{}' does not exist yet.",
                    path.display()
                ));
            }
            config.credentials_file = Some(path);
        }
    }
    Ok(())
}

fn show(config: &Config, manager: &ConfigManager, formatter: &Formatter) {
    if formatter.is_json() {
        formatter.json(&ConfigOutput {
            path: manager.config_path().display().to_string(),
            config,
        });
        return;
    }

    let unset = "(not set)".to_string();
    formatter.println(&format!("Config file: {}", manager.config_path().display()));
    formatter.println(&format!(
        "bucket:           {}",
        config.bucket.as_ref().unwrap_or(&unset)
    ));
    formatter.println(&format!(
        "credentials_file: {}",
        config
            .credentials_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or(unset)
    ));
}
