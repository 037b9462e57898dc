//! Environment configuration for the `docgate` binary

use std::time::Duration;
use thiserror::Error;
use tracing::Level;

use crate::api::handlers::DEFAULT_BASE_PATH;

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_NAMESPACE: &str = "did:sidetree";
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Invalid environment value
#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid value for {name}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub reason: String,
}

/// Settings for a single-namespace document server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocgateConfig {
    pub address: String,
    pub cert_file: String,
    pub key_file: String,
    pub namespace: String,
    pub base_path: String,
    pub shutdown_timeout: Duration,
    pub log_level: Level,
}

impl Default for DocgateConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.into(),
            cert_file: String::new(),
            key_file: String::new(),
            namespace: DEFAULT_NAMESPACE.into(),
            base_path: DEFAULT_BASE_PATH.into(),
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            log_level: Level::INFO,
        }
    }
}

impl DocgateConfig {
    /// Read `DOCGATE_*` variables from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let shutdown_timeout = match lookup("DOCGATE_SHUTDOWN_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError {
                    name: "DOCGATE_SHUTDOWN_TIMEOUT_SECS",
                    reason: e.to_string(),
                })?,
            None => defaults.shutdown_timeout,
        };

        let log_level = match lookup("DOCGATE_LOG_LEVEL") {
            Some(raw) => raw.parse::<Level>().map_err(|e| ConfigError {
                name: "DOCGATE_LOG_LEVEL",
                reason: e.to_string(),
            })?,
            None => defaults.log_level,
        };

        let base_path = lookup("DOCGATE_BASE_PATH").unwrap_or(defaults.base_path);
        if !base_path.starts_with('/') {
            return Err(ConfigError {
                name: "DOCGATE_BASE_PATH",
                reason: "must start with '/'".into(),
            });
        }

        Ok(Self {
            address: lookup("DOCGATE_ADDR").unwrap_or(defaults.address),
            cert_file: lookup("DOCGATE_TLS_CERT").unwrap_or_default(),
            key_file: lookup("DOCGATE_TLS_KEY").unwrap_or_default(),
            namespace: lookup("DOCGATE_NAMESPACE").unwrap_or(defaults.namespace),
            base_path,
            shutdown_timeout,
            log_level,
        })
    }
}
