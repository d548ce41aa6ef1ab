//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

use rusqlite::Connection;
use std::path::Path;

use crate::config::StoreConfig;
use crate::errors::{from_rusqlite, Result};

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Open the database named by `config` and apply its pragmas
pub fn open_with_config(config: &StoreConfig) -> Result<Connection> {
    let conn = if config.is_in_memory() {
        open_in_memory()?
    } else {
        open(&config.database)?
    };
    configure(&conn, config)?;
    tracing::debug!(
        database = %config.database,
        foreign_keys = config.foreign_keys,
        "connection opened"
    );
    Ok(conn)
}

/// Apply connection settings from `config`
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)
        .map_err(from_rusqlite)?;

    if let Some(mode) = &config.journal_mode {
        conn.pragma_update(None, "journal_mode", mode)
            .map_err(from_rusqlite)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_with_default_config() {
        let conn = open_with_config(&StoreConfig::in_memory()).unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 0);
    }

    #[test]
    fn test_foreign_keys_pragma_applied() {
        let config = StoreConfig {
            foreign_keys: true,
            ..StoreConfig::in_memory()
        };
        let conn = open_with_config(&config).unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
