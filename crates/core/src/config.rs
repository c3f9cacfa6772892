//! Runtime configuration
//!
//! Read from the environment (and a `.env` file, if present):
//! - `PROMPT_VAULT_DATA`: SQLite file, default `<data dir>/promptvault/vault.db`
//! - `PROMPT_VAULT_LOG`: tracing filter, default `info`

use std::path::PathBuf;

use crate::errors::{Result, VaultError};

pub const DATA_PATH_ENV: &str = "PROMPT_VAULT_DATA";
pub const LOG_FILTER_ENV: &str = "PROMPT_VAULT_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    pub data_path:  PathBuf,
    pub log_filter: String,
}

impl VaultConfig {
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_path = match lookup(DATA_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_data_path()?,
        };
        let log_filter = lookup(LOG_FILTER_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            data_path,
            log_filter,
        })
    }

    pub fn with_data_path(path: impl Into<PathBuf>) -> Self {
        Self {
            data_path:  path.into(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Get default database path (<data dir>/promptvault/vault.db)
pub fn default_data_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| VaultError::ConfigError("Could not determine data directory".into()))?;
    Ok(data_dir.join("promptvault").join("vault.db"))
}
