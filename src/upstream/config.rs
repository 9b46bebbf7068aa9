//! Upstream endpoint and sampling parameters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Hosted chat-completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/chat/completions";

/// Provider's chat model identifier
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Deadline for the upstream call to produce a response
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Parameters for controlling text generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
    /// Randomness (higher = more random)
    pub temperature: f32,
    /// Nucleus sampling threshold
    pub top_p: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_tokens: 2000,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// Where and how the relay talks to the provider
#[derive(Clone)]
pub struct UpstreamConfig {
    /// Full URL of the chat-completions endpoint
    pub endpoint: String,
    /// Bearer credential
    pub api_key: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Deadline for the provider to answer
    pub timeout: Duration,
    /// Fixed sampling parameters
    pub sampling: SamplingConfig,
}

impl UpstreamConfig {
    /// Create a configuration for the default endpoint and model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            sampling: SamplingConfig::default(),
        }
    }

    /// Point the client at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the response deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("sampling", &self.sampling)
            .finish()
    }
}
