//! Client configuration loaded from the environment (and `.env`)

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API base path, e.g. `http://localhost:8080/api`
    pub api_base_url: String,
    /// Transport-level request timeout
    pub timeout: Duration,
    /// Page size used for transaction listing
    pub page_size: u32,
    /// Directory holding persisted client storage (the auth token)
    pub storage_dir: PathBuf,
    /// How long a toast stays active
    pub toast_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            timeout: Duration::from_secs(10),
            page_size: 20,
            storage_dir: PathBuf::from(".expense-tracker"),
            toast_timeout: Duration::from_millis(3000),
        }
    }
}

impl ClientConfig {
    /// Build the configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("EXPENSE_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);

        let timeout = parse_var::<u64, _>(&lookup, "EXPENSE_API_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let page_size = parse_var::<u32, _>(&lookup, "EXPENSE_PAGE_SIZE")?.unwrap_or(defaults.page_size);
        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "EXPENSE_PAGE_SIZE".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let storage_dir = lookup("EXPENSE_TOKEN_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_dir);

        let toast_timeout = parse_var::<u64, _>(&lookup, "EXPENSE_TOAST_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.toast_timeout);

        Ok(Self {
            api_base_url,
            timeout,
            page_size,
            storage_dir,
            toast_timeout,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}
