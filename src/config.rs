//! Configuration loading
//!
//! Layered: embedded defaults, then an optional `credgate.toml` next to the
//! process, then `CREDGATE_`-prefixed environment variables. Connection
//! parameters live here so the store code never hard-codes a medium.

use crate::store::StoreBackend;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Embedded default configuration (compiled into the library)
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Default credential file name, kept from the original record file
const CRED_FILE_NAME: &str = "usrcreds.json";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Store backend selection and connection parameters
    pub store: StoreConfig,
}

/// Backing-medium configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Which backing medium to open
    #[serde(default)]
    pub backend: StoreBackend,
    /// Path to the JSON record file; defaults to `~/.credgate/usrcreds.json`
    #[serde(default)]
    pub file_path: Option<PathBuf>,
    /// SQLite connection URL, `mode=rwc` so the database is created if absent
    #[serde(default = "default_sqlite_url")]
    pub sqlite_url: String,
}

fn default_sqlite_url() -> String {
    "sqlite://credgate.db?mode=rwc".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            file_path: None,
            sqlite_url: default_sqlite_url(),
        }
    }
}

impl StoreConfig {
    /// Resolve the credential file path, falling back to the home directory
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.file_path.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".credgate").join(CRED_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(CRED_FILE_NAME))
        })
    }
}

/// Load configuration from embedded defaults, files, and environment
pub fn load_config() -> Result<AppConfig> {
    let config = Config::builder()
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. External overrides (optional)
        .add_source(File::with_name("credgate").required(false))
        // 3. Environment variables (highest priority)
        .add_source(
            Environment::with_prefix("CREDGATE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_deserialize() {
        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap();
        let app: AppConfig = config.try_deserialize().unwrap();
        assert_eq!(app.store.backend, StoreBackend::File);
        assert!(app.store.sqlite_url.starts_with("sqlite://"));
    }

    #[test]
    fn test_file_path_override() {
        let store = StoreConfig {
            file_path: Some(PathBuf::from("/tmp/creds.json")),
            ..StoreConfig::default()
        };
        assert_eq!(store.file_path(), PathBuf::from("/tmp/creds.json"));
    }
}
