// ==========================================
// SteelWorks Operations - connection settings
// ==========================================
// Sources: process environment, optionally pre-loaded from `.env`
// Precedence: DATABASE_URL > DB_DIR/DB_NAME > platform data dir default
// ==========================================

use crate::db::DEFAULT_BUSY_TIMEOUT_MS;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod env_keys {
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const DB_DIR: &str = "DB_DIR";
    pub const DB_NAME: &str = "DB_NAME";
    pub const DB_BUSY_TIMEOUT_MS: &str = "DB_BUSY_TIMEOUT_MS";
    pub const PERF_SQL: &str = "STEELWORKS_PERF_SQL";
    pub const SLOW_SQL_MS: &str = "STEELWORKS_SLOW_SQL_MS";
}

/// Default database name (file stem)
pub const DEFAULT_DB_NAME: &str = "steelworks_ops";

/// Application directory under the platform data dir
pub const DEFAULT_DATA_SUBDIR: &str = "steelworks-ops";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unsupported database url scheme: {0} (expected sqlite://, sqlite:, file: or sqlite::memory:)")]
    UnsupportedUrl(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
}

/// Where the store lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

impl StoreLocation {
    /// Parse a full connection URL
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();
        if url == "sqlite::memory:" || url == ":memory:" {
            return Ok(StoreLocation::Memory);
        }

        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .or_else(|| url.strip_prefix("file:"))
            .ok_or_else(|| ConfigError::UnsupportedUrl(url.to_string()))?;

        // drop query options such as ?mode=rwc
        let path = path.split('?').next().unwrap_or(path);
        if path.is_empty() {
            return Err(ConfigError::UnsupportedUrl(url.to_string()));
        }
        Ok(StoreLocation::File(PathBuf::from(path)))
    }
}

/// Store connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub location: StoreLocation,
    pub busy_timeout_ms: u64,
}

impl DatabaseSettings {
    /// Settings for a database file at `path`
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            location: StoreLocation::File(path.as_ref().to_path_buf()),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Settings for a private in-memory store
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::Memory,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Read from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary key lookup (env, map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let location = match get(env_keys::DATABASE_URL) {
            Some(url) => StoreLocation::from_url(&url)?,
            None => {
                let dir = get(env_keys::DB_DIR)
                    .map(PathBuf::from)
                    .unwrap_or_else(default_data_dir);
                let name = get(env_keys::DB_NAME).unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
                StoreLocation::File(dir.join(format!("{}.db", name)))
            }
        };

        let busy_timeout_ms = match get(env_keys::DB_BUSY_TIMEOUT_MS) {
            Some(v) => v.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: env_keys::DB_BUSY_TIMEOUT_MS.to_string(),
                value: v,
            })?,
            None => DEFAULT_BUSY_TIMEOUT_MS,
        };

        Ok(Self {
            location,
            busy_timeout_ms,
        })
    }

    /// Human-readable target for logs
    pub fn describe(&self) -> String {
        match &self.location {
            StoreLocation::File(path) => format!("sqlite://{}", path.display()),
            StoreLocation::Memory => "sqlite::memory:".to_string(),
        }
    }
}

/// SQL statement tracing switches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerfSettings {
    pub enabled: bool,
    pub slow_sql_ms: u64,
}

impl Default for PerfSettings {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            slow_sql_ms: if cfg!(debug_assertions) { 50 } else { 200 },
        }
    }
}

impl PerfSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            enabled: lookup(env_keys::PERF_SQL)
                .map(|v| is_true(&v))
                .unwrap_or(defaults.enabled),
            slow_sql_ms: lookup(env_keys::SLOW_SQL_MS)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(defaults.slow_sql_ms),
        }
    }
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// `<data dir>/steelworks-ops`, or the working directory when the platform
/// has no data dir
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(DEFAULT_DATA_SUBDIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load `.env` from the working directory if there is one
///
/// A missing file is not an error; a malformed one is.
pub fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::DotEnv(e)),
    }
}
