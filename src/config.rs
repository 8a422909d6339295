//! stratadb configuration
//!
//! Configuration is a JSON document with `store` and `http` sections.
//! Every field has a default, so an empty object is a valid config.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::retry::RetryPolicy;

/// Configuration load errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for the schema
    #[error("cannot parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Core store tuning
    #[serde(default)]
    pub store: StoreConfig,

    /// HTTP server settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

/// Core store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Commit retries after a compare-and-swap conflict (default: 3)
    #[serde(default = "default_max_commit_retries")]
    pub max_commit_retries: usize,

    /// Backoff schedule for index projection upserts, in milliseconds
    /// (default: [50, 200, 800])
    #[serde(default = "default_index_retry_delays_ms")]
    pub index_retry_delays_ms: Vec<u64>,

    /// Page size for document listings when the caller gives none
    /// (default: 25)
    #[serde(default = "default_list_limit")]
    pub default_list_limit: usize,
}

fn default_max_commit_retries() -> usize {
    3
}

fn default_index_retry_delays_ms() -> Vec<u64> {
    vec![50, 200, 800]
}

fn default_list_limit() -> usize {
    25
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_commit_retries: default_max_commit_retries(),
            index_retry_delays_ms: default_index_retry_delays_ms(),
            default_list_limit: default_list_limit(),
        }
    }
}

impl StoreConfig {
    /// The retry policy applied to index projection.
    pub fn index_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.index_retry_delays_ms
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
        )
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 7474)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means permissive (development)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    7474
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.store.max_commit_retries, 3);
        assert_eq!(config.store.index_retry_delays_ms, vec![50, 200, 800]);
        assert_eq!(config.store.default_list_limit, 25);
        assert_eq!(config.http.socket_addr(), "0.0.0.0:7474");
    }

    #[test]
    fn test_partial_override() {
        let config: Config =
            serde_json::from_str(r#"{"http": {"port": 8080}, "store": {"max_commit_retries": 1}}"#)
                .unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.store.max_commit_retries, 1);
    }

    #[test]
    fn test_index_retry_policy_attempts() {
        let store = StoreConfig::default();
        assert_eq!(store.index_retry_policy().attempts(), 4);

        let no_retry = StoreConfig {
            index_retry_delays_ms: Vec::new(),
            ..Default::default()
        };
        assert_eq!(no_retry.index_retry_policy().attempts(), 1);
    }
}
