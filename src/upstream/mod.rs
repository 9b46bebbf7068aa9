//! Upstream chat-completions layer
//!
//! This module owns everything about the outbound call to the hosted
//! chat-completions API: the request payload, the fixed persona prompt, the
//! provider seam, and the reqwest-backed client that streams raw reply bytes.

pub mod client;
pub mod config;
pub mod error;
pub mod prompt;
pub mod provider;
pub mod types;

// Re-export commonly used types
pub use client::ChatCompletionsClient;
pub use config::{SamplingConfig, UpstreamConfig};
pub use error::UpstreamError;
pub use prompt::{build_chat_request, SYSTEM_PROMPT};
pub use provider::{ByteStream, ChatProvider};
pub use types::{ChatCompletionRequest, ChatMessage, ChatRole};
