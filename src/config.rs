//! Runtime configuration.
//!
//! Environment variables provide defaults; CLI flags override them.

use thiserror::Error;
use url::Url;

/// Environment variable holding the service base URL.
pub const BASE_URL_ENV: &str = "TASK_TRIAGE_URL";

/// Local development server, matching the service's default bind address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/tasks";

#[derive(Debug, Error)]
#[error("invalid service URL '{raw}': {source}")]
pub struct ConfigError {
    raw: String,
    #[source]
    source: url::ParseError,
}

/// Resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL the two operations hang off of.
    pub base_url: Url,
}

impl Config {
    /// Resolve from an optional flag override, then the environment, then
    /// the built-in default. Invalid URLs fail fast at startup.
    pub fn resolve(flag: Option<&str>) -> Result<Self, ConfigError> {
        let raw = match flag {
            Some(value) => value.to_string(),
            None => std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };
        let base_url = Url::parse(&raw).map_err(|source| ConfigError { raw, source })?;
        Ok(Self { base_url })
    }
}
