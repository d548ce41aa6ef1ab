//! Store configuration
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! database = "roster.db"     # or ":memory:"
//! foreign_keys = false
//! journal_mode = "WAL"
//! log_profile = "production" # development | production | test
//! ```

use roster_core::logging_facility::{self, Profile};
use serde::Deserialize;
use std::path::Path;

use crate::errors::{config_error, io_error, Result};

/// Path value that selects a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Database file path, or `:memory:`
    pub database: String,
    /// Enforce `REFERENCES` clauses in SQLite itself. Off by default:
    /// references are validated by the models, not by the database.
    pub foreign_keys: bool,
    /// Optional `PRAGMA journal_mode` value
    pub journal_mode: Option<String>,
    /// Logging profile for `init_logging`
    pub log_profile: Profile,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: IN_MEMORY.to_string(),
            foreign_keys: false,
            journal_mode: None,
            log_profile: Profile::default(),
        }
    }
}

impl StoreConfig {
    /// Configuration for a private in-memory database
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text
    ///
    /// # Errors
    /// `Config` for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| config_error(e.to_string()))
    }

    /// Read and parse a TOML configuration file
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `Config` if it cannot be parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| io_error("read_config", e))?;
        Self::from_toml_str(&text)
    }

    pub fn is_in_memory(&self) -> bool {
        self.database == IN_MEMORY
    }

    /// Install the global subscriber for `log_profile`
    pub fn init_logging(&self) {
        logging_facility::init(self.log_profile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert!(config.is_in_memory());
        assert!(!config.foreign_keys);
    }

    #[test]
    fn test_full_config() {
        let config = StoreConfig::from_toml_str(
            r#"
            database = "company.db"
            foreign_keys = true
            journal_mode = "WAL"
            log_profile = "production"
            "#,
        )
        .unwrap();
        assert_eq!(config.database, "company.db");
        assert!(config.foreign_keys);
        assert_eq!(config.journal_mode.as_deref(), Some("WAL"));
        assert_eq!(config.log_profile, Profile::Production);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = StoreConfig::from_toml_str("databse = \"typo.db\"").unwrap_err();
        assert_eq!(err.kind(), roster_core::ExErrorKind::Config);
    }
}
