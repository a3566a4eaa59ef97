//! Configuration management
//!
//! Settings live in `~/.bglog/config.yaml`. The only setting today is the
//! database location, which can also come from the command line or the
//! `BGLOG_DATABASE` environment variable.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::storage::db::default_db_path;

/// Environment variable that overrides the configured database path.
pub const DATABASE_ENV_VAR: &str = "BGLOG_DATABASE";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Database file to use instead of the default
    pub database_path: Option<PathBuf>,
}

/// Where the database path was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    Flag,
    Environment,
    ConfigFile,
    Default,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::Flag => write!(f, "--database flag"),
            PathSource::Environment => write!(f, "{DATABASE_ENV_VAR}"),
            PathSource::ConfigFile => write!(f, "config file"),
            PathSource::Default => write!(f, "default"),
        }
    }
}

impl Config {
    /// Load the config file, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_saphyr::from_str(contents)?)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
            .join(".bglog");

        Ok(config_dir.join("config.yaml"))
    }

    /// Pick the database path: flag, then environment, then config, then default.
    pub fn resolve_database_path(
        &self,
        flag: Option<&Path>,
        env_value: Option<String>,
    ) -> Result<(PathBuf, PathSource)> {
        if let Some(path) = flag {
            return Ok((path.to_path_buf(), PathSource::Flag));
        }
        if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
            return Ok((PathBuf::from(value), PathSource::Environment));
        }
        if let Some(path) = &self.database_path {
            return Ok((path.clone(), PathSource::ConfigFile));
        }
        Ok((default_db_path()?, PathSource::Default))
    }
}
