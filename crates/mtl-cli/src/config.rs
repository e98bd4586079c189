//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use mtl_core::{DEFAULT_WORKDAYS_PER_WEEK, validate_workdays};

/// File name of the log inside the data directory.
const LOG_FILE_NAME: &str = "work_log.txt";

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the work log file.
    pub log_path: PathBuf,

    /// Workdays used to average this week's total.
    pub workdays_per_week: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("log_path", &self.log_path)
            .field("workdays_per_week", &self.workdays_per_week)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            log_path: data_dir.join(LOG_FILE_NAME),
            workdays_per_week: DEFAULT_WORKDAYS_PER_WEEK,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    pub fn load_from(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (MTL_*)
        figment = figment.merge(Env::prefixed("MTL_"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        validate_workdays(self.workdays_per_week).context("invalid workdays_per_week")?;
        Ok(())
    }
}

/// Returns the platform-specific config directory for mtl.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mtl"))
}

/// Returns the platform-specific data directory for mtl.
///
/// On Linux: `~/.local/share/mtl`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("mtl"))
}
