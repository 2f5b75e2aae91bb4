//! # Store Configuration
//!
//! How the single SQLite connection is opened.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Builder calls (highest priority)                                   │
//! │     StoreConfig::new(path).busy_timeout(..)                            │
//! │                                                                         │
//! │  2. Environment Variables (StoreConfig::from_env)                      │
//! │     ROSTER_DB_PATH=/data/roster.db                                     │
//! │     ROSTER_BUSY_TIMEOUT_MS=2000                                        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ./roster.db, 5s busy timeout, create file + schema                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::SqliteConnectOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// Default database file when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "./roster.db";

const IN_MEMORY: &str = ":memory:";

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/roster.db")
///     .busy_timeout(Duration::from_secs(1))
///     .create_schema(true);
/// let store = Store::connect(config).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// How long a step waits on a locked database before failing.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Whether a missing file is created.
    /// Default: true
    pub create_if_missing: bool,

    /// Whether `Store::connect` creates the Employees table.
    /// Default: true
    pub create_schema: bool,
}

impl StoreConfig {
    /// Creates a new configuration for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            busy_timeout: Duration::from_secs(5),
            create_if_missing: true,
            create_schema: true,
        }
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// The database lives as long as the store's connection.
    pub fn in_memory() -> Self {
        StoreConfig::new(IN_MEMORY)
    }

    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `ROSTER_DB_PATH`: database file path
    /// - `ROSTER_BUSY_TIMEOUT_MS`: busy timeout in milliseconds
    pub fn from_env() -> Self {
        let path = std::env::var("ROSTER_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let mut config = StoreConfig::new(path);

        if let Ok(timeout) = std::env::var("ROSTER_BUSY_TIMEOUT_MS") {
            match timeout.parse::<u64>() {
                Ok(ms) => {
                    debug!(ms, "Overriding busy timeout from environment");
                    config.busy_timeout = Duration::from_millis(ms);
                }
                Err(_) => warn!(value = %timeout, "Ignoring invalid ROSTER_BUSY_TIMEOUT_MS"),
            }
        }

        config
    }

    /// Sets the busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether a missing database file is created.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Sets whether the schema is created on connect.
    pub fn create_schema(mut self, create: bool) -> Self {
        self.create_schema = create;
        self
    }

    /// Returns true for the in-memory configuration.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }

    /// Builds the sqlx connection options.
    ///
    /// The statement cache is disabled: every operation compiles and
    /// releases its own statement.
    pub(crate) fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(DbError::open)?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(self.create_if_missing)
        };

        Ok(options
            .busy_timeout(self.busy_timeout)
            .statement_cache_capacity(0))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_DB_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("/tmp/test.db")
            .busy_timeout(Duration::from_millis(250))
            .create_if_missing(false)
            .create_schema(false);

        assert_eq!(config.database_path, PathBuf::from("/tmp/test.db"));
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert!(!config.create_if_missing);
        assert!(!config.create_schema);
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
        assert!(config.create_if_missing);
        assert!(config.create_schema);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_in_memory() {
        let config = StoreConfig::in_memory();
        assert!(config.is_in_memory());
        assert!(config.connect_options().is_ok());
    }
}
