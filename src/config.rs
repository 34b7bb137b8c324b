//! Configuration management for querygate.
//!
//! Handles loading configuration from a TOML file. Command-line flags and
//! environment variables are layered on top by the binary.

use crate::error::{QueryGateError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for querygate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Dataset and store locations.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Logging destination.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the source data lives and where the store is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetConfig {
    /// CSV file with a header row.
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// SQLite store file, created on first run.
    #[serde(default = "default_store")]
    pub store: PathBuf,

    /// Name of the single queryable table.
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_source() -> PathBuf {
    PathBuf::from("customers.csv")
}

fn default_store() -> PathBuf {
    PathBuf::from("bank_data.db")
}

fn default_table() -> String {
    "customers".to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            store: default_store(),
            table: default_table(),
        }
    }
}

impl DatasetConfig {
    /// Overrides fields with any values given on the command line.
    pub fn merge(&mut self, source: Option<PathBuf>, store: Option<PathBuf>, table: Option<String>) {
        if let Some(source) = source {
            self.source = source;
        }
        if let Some(store) = store {
            self.store = store;
        }
        if let Some(table) = table {
            self.table = table;
        }
    }

    /// Checks that the table name is safe to interpolate into SQL.
    pub fn validate(&self) -> Result<()> {
        if self.table.is_empty() {
            return Err(QueryGateError::config("Table name must not be empty"));
        }
        if !self
            .table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(QueryGateError::config(format!(
                "Invalid table name '{}'. Use letters, digits and underscores only",
                self.table
            )));
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LoggingConfig {
    /// Write logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("querygate")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file; a missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| QueryGateError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            QueryGateError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
