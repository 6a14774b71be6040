//! Store configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HISAAB_DB_PATH` | `./hisaab.db` |
//! | `HISAAB_MAX_CONNECTIONS` | `5` |
//! | `HISAAB_LOG` | `info,hisaab=debug,sqlx=warn` |

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::pool::DbConfig;

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "./hisaab.db";

/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "info,hisaab=debug,sqlx=warn";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub max_connections: u32,

    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = StoreConfig::default();

        let config = StoreConfig {
            database_path: lookup("HISAAB_DB_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            max_connections: match lookup("HISAAB_MAX_CONNECTIONS") {
                Some(value) => value
                    .trim()
                    .parse()
                    .ok()
                    .filter(|max: &u32| *max > 0)
                    .ok_or_else(|| ConfigError::InvalidValue("HISAAB_MAX_CONNECTIONS".to_string()))?,
                None => defaults.max_connections,
            },

            log_filter: lookup("HISAAB_LOG").unwrap_or(defaults.log_filter),
        };

        Ok(config)
    }

    /// Pool settings for [`Database::new`](crate::Database::new).
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone()).max_connections(self.max_connections)
    }
}

/// Installs the global tracing subscriber.
///
/// ## Log Levels
/// - `HISAAB_LOG=debug` - Show debug messages
/// - `HISAAB_LOG=hisaab_db=trace` - Show trace for the store only
///
/// An invalid directive falls back to [`DEFAULT_LOG_FILTER`]. Calling this
/// twice is harmless; the first subscriber stays.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
