//! Application configuration
//!
//! Loaded from a TOML file. Every field has a default, so a partial or
//! missing file still yields a usable config.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{CineError, Result};

/// Default storage key, shared with the browser build's local storage key
pub const DEFAULT_STORAGE_KEY: &str = "cinerank-rankings";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding persisted ranked lists
    pub storage_dir: PathBuf,

    /// Key the ranked list is stored under (file stem inside `storage_dir`)
    pub storage_key: String,

    /// JSON file of catalog items available for ranking
    pub catalog_path: PathBuf,

    /// `tracing` filter directive used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".cinerank"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            catalog_path: PathBuf::from("catalog.json"),
            log_filter: "cinerank=info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from a TOML file
    ///
    /// A missing file yields defaults. A file that exists but cannot be read
    /// or parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| CineError::Config(format!("Failed to read {:?}: {}", path, e)))?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)
            .map_err(|e| CineError::Config(format!("Failed to parse config TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(CineError::Config("storage_key must not be empty".into()));
        }

        if self.storage_key.contains(['/', '\\']) || self.storage_key.contains("..") {
            return Err(CineError::Config(format!(
                "storage_key ({}) must be a plain name, not a path",
                self.storage_key
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage_key, "cinerank-rankings");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = AppConfig::from_toml("storage_key = \"friends\"\n").unwrap();
        assert_eq!(config.storage_key, "friends");
        assert_eq!(config.storage_dir, PathBuf::from(".cinerank"));
        assert_eq!(config.log_filter, "cinerank=info");
    }

    #[test]
    fn test_storage_key_with_path_rejected() {
        let result = AppConfig::from_toml("storage_key = \"../etc/passwd\"\n");
        assert!(matches!(result, Err(CineError::Config(_))));
    }

    #[test]
    fn test_empty_storage_key_rejected() {
        let config = AppConfig {
            storage_key: "  ".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(AppConfig::from_toml("storage_key = [").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load(Path::new("/nonexistent/cinerank.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
