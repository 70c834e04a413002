//! Configuration management
//!
//! This module handles loading and saving the gcsu configuration file and
//! resolving the effective [`Settings`] for a storage command.
//! The configuration file is stored in TOML format at
//! `$GCSU_CONFIG_DIR/config.toml`, or `<config dir>/gcsu/config.toml`.
//!
//! Files written with a newer `schema_version` are rejected rather than
//! misread.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "GCSU_CONFIG_DIR";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,

    /// Path to the service account key file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            bucket: None,
            credentials_file: None,
        }
    }
}

/// Values given on the command line or through the environment.
///
/// These take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bucket: Option<String>,
    pub credentials_file: Option<PathBuf>,
}

/// Fully resolved settings required by every storage command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Target bucket
    pub bucket: String,
    /// Service account key file
    pub credentials_file: PathBuf,
}

impl Settings {
    /// Merge overrides with the configuration file.
    ///
    /// Blank values count as unset. Fails with
    /// [`Error::ConfigurationIncomplete`] naming every missing value.
    pub fn resolve(config: &Config, overrides: &Overrides) -> Result<Self> {
        let bucket = overrides
            .bucket
            .clone()
            .or_else(|| config.bucket.clone())
            .filter(|b| !b.trim().is_empty());

        let credentials_file = overrides
            .credentials_file
            .clone()
            .or_else(|| config.credentials_file.clone())
            .filter(|p| !p.as_os_str().is_empty());

        match (bucket, credentials_file) {
            (Some(bucket), Some(credentials_file)) => Ok(Self {
                bucket,
                credentials_file,
            }),
            (bucket, credentials_file) => {
                let mut missing = Vec::new();
                if bucket.is_none() {
                    missing.push("bucket");
                }
                if credentials_file.is_none() {
                    missing.push("credentials file");
                }
                Err(Error::ConfigurationIncomplete {
                    missing: missing.join(" and "),
                })
            }
        }
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("gcsu"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade gcsu.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }

    /// Save configuration to disk
    ///
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 600 (owner read/write only).
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.config_path, permissions)?;
        }

        Ok(())
    }
}
