//! Process configuration
//!
//! Read once at startup; shared read-only with every request afterwards.

use std::path::PathBuf;
use thiserror::Error;

use crate::upstream::UpstreamConfig;

/// Port used when `PORT` is unset
pub const DEFAULT_PORT: u16 = 3000;

/// Directory the static site is served from, relative to the working directory
pub const DEFAULT_STATIC_ROOT: &str = "public";

pub const PORT_VAR: &str = "PORT";
pub const API_KEY_VAR: &str = "DEEPSEEK_API_KEY";
pub const STATIC_ROOT_VAR: &str = "STATIC_ROOT";

/// Errors raised while reading the configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a valid port: {value:?}")]
    InvalidPort { var: &'static str, value: String },

    #[error("{0} must be set to the upstream API key")]
    MissingApiKey(&'static str),
}

/// Everything the server needs to run
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listening port
    pub port: u16,
    /// Root of the static site; the home page is `index.html` inside it
    pub static_root: PathBuf,
    /// Outbound chat-completions settings
    pub upstream: UpstreamConfig,
}

impl ServerConfig {
    /// Create a configuration with defaults for everything but the credential
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            port: DEFAULT_PORT,
            static_root: PathBuf::from(DEFAULT_STATIC_ROOT),
            upstream: UpstreamConfig::new(api_key),
        }
    }

    /// Serve the static site from a different directory
    pub fn with_static_root(mut self, static_root: impl Into<PathBuf>) -> Self {
        self.static_root = static_root.into();
        self
    }

    /// Replace the upstream settings
    pub fn with_upstream(mut self, upstream: UpstreamConfig) -> Self {
        self.upstream = upstream;
        self
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;

        let port = match lookup(PORT_VAR) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort {
                    var: PORT_VAR,
                    value,
                })?,
            None => DEFAULT_PORT,
        };

        let static_root = lookup(STATIC_ROOT_VAR)
            .map(|root| root.trim().to_string())
            .filter(|root| !root.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_ROOT));

        Ok(Self {
            port,
            static_root,
            ..Self::new(api_key)
        })
    }
}
