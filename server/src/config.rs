//! Server configuration parsed from environment variables.
//!
//! Required:
//! - `FIRESTORE_PROJECT_ID`
//! - `FIRESTORE_API_KEY`
//!
//! Optional:
//! - `PORT`: default 3000
//! - `FIRESTORE_DATABASE`: default `(default)`
//! - `FIRESTORE_BASE_URL`: default Firestore REST endpoint
//! - `RUST_LOG`: log filter, default `info`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use gate::firestore::FirestoreConfig;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is required")]
    Missing { var: &'static str },
    #[error("invalid PORT: {value}")]
    InvalidPort { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub firestore: FirestoreConfig,
}

impl ServerConfig {
    /// Build typed config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or `PORT`
    /// is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_port(lookup("PORT").as_deref())?;
        let project_id = required(&lookup, "FIRESTORE_PROJECT_ID")?;
        let api_key = required(&lookup, "FIRESTORE_API_KEY")?;

        let mut firestore = FirestoreConfig::new(project_id, api_key);
        if let Some(database) = non_empty(lookup("FIRESTORE_DATABASE")) {
            firestore.database = database;
        }
        if let Some(base_url) = non_empty(lookup("FIRESTORE_BASE_URL")) {
            firestore.base_url = base_url.trim_end_matches('/').to_string();
        }

        Ok(Self { port, firestore })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn required(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<String, ConfigError> {
    non_empty(lookup(var)).ok_or(ConfigError::Missing { var })
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidPort { value: value.to_string() }),
    }
}

/// Log filter from a raw `RUST_LOG` value. Unset, blank, or invalid values
/// fall back to [`DEFAULT_LOG_FILTER`].
#[must_use]
pub fn log_filter(raw: Option<&str>) -> EnvFilter {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
