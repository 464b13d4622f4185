//! Configuration management
//!
//! This module resolves the per-run configuration and loads the optional
//! thaw configuration file. The file is stored in TOML format at
//! ~/.config/thaw/config.toml.
//!
//! Files with a schema_version newer than SCHEMA_VERSION are rejected.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::{StoragePath, parse_storage_path};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Retention used when neither the command line nor the config file sets one
pub const DEFAULT_RETENTION_DAYS: u32 = 1;

/// Settings for a single restore run
///
/// Immutable once built; every field is validated by [`RunConfig::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Bucket and prefix to scan
    pub path: StoragePath,
    /// Number of days restored copies stay available
    pub retention_days: u32,
    /// Report intended restores without issuing them
    pub dry_run: bool,
}

impl RunConfig {
    /// Build a run configuration from raw inputs
    pub fn new(raw_path: &str, retention_days: u32, dry_run: bool) -> Result<Self> {
        let path = parse_storage_path(raw_path)?;

        if retention_days == 0 {
            return Err(Error::InvalidArgument(
                "days must be a positive integer".into(),
            ));
        }

        Ok(Self {
            path,
            retention_days,
            dry_run,
        })
    }
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default run settings
    #[serde(default)]
    pub defaults: Defaults,

    /// S3 connection settings
    #[serde(default)]
    pub client: ClientSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            client: ClientSettings::default(),
        }
    }
}

/// Default run settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// Retention days used when `--days` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
}

impl Defaults {
    /// Pick the retention days: explicit value, then file default, then built-in
    pub fn resolve_days(&self, explicit: Option<u32>) -> u32 {
        explicit.or(self.days).unwrap_or(DEFAULT_RETENTION_DAYS)
    }
}

/// How to reach the S3 service
///
/// Unset fields fall back to the AWS SDK's own provider chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Region override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Named profile from the shared AWS config files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Use path-style bucket addressing
    #[serde(default)]
    pub force_path_style: bool,
}

impl ClientSettings {
    /// Overlay explicitly given settings on top of these
    pub fn merge(self, overrides: ClientSettings) -> Self {
        Self {
            region: overrides.region.or(self.region),
            endpoint_url: overrides.endpoint_url.or(self.endpoint_url),
            profile: overrides.profile.or(self.profile),
            force_path_style: overrides.force_path_style || self.force_path_style,
        }
    }
}

/// Configuration manager handles locating and loading the config file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        let config_path = config_dir.join("thaw").join("config.toml");
        Ok(Self { config_path })
    }

    /// Create a ConfigManager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
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
                "Configuration file version {} is newer than supported version {}. Please upgrade thaw.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        if config.defaults.days == Some(0) {
            return Err(Error::Config(format!(
                "{}: defaults.days must be a positive integer",
                self.config_path.display()
            )));
        }

        Ok(config)
    }
}
