//! Server configuration.
//!
//! Read once at start-up from environment variables:
//! - `HOST` - bind address (default `127.0.0.1`)
//! - `PORT` - bind port (default `8080`)
//! - `STORAGE_MODE` - `sqlite` (default) or `memory`
//! - `DATABASE_PATH` - SQLite file (default `data/tasks.db`)

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_PATH: &str = "data/tasks.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid PORT value '{0}': expected an integer between 1 and 65535")]
    InvalidPort(String),

    #[error("Unknown STORAGE_MODE '{0}': expected 'sqlite' or 'memory'")]
    UnknownStorageMode(String),
}

/// Where task records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    Sqlite { path: PathBuf },
    Memory,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::Sqlite { .. } => "sqlite",
            StorageMode::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: StorageMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            storage: StorageMode::Sqlite {
                path: PathBuf::from(DEFAULT_DATABASE_PATH),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get("PORT") {
            Some(raw) => match raw.parse::<u16>() {
                Ok(p) if p > 0 => p,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        let path = get("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let storage = match get("STORAGE_MODE").map(|m| m.to_lowercase()).as_deref() {
            None | Some("sqlite") => StorageMode::Sqlite { path },
            Some("memory") => StorageMode::Memory,
            Some(other) => return Err(ConfigError::UnknownStorageMode(other.to_string())),
        };

        Ok(Self {
            host,
            port,
            storage,
        })
    }
}
