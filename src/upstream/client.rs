//! reqwest-backed chat-completions client

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::config::UpstreamConfig;
use super::error::UpstreamError;
use super::provider::{ByteStream, ChatProvider};
use super::types::ChatCompletionRequest;

/// Client for an OpenAI-compatible chat-completions endpoint
pub struct ChatCompletionsClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Full endpoint URL
    endpoint: String,
    /// Bearer credential
    api_key: String,
}

impl ChatCompletionsClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| UpstreamError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatProvider for ChatCompletionsClient {
    async fn stream_chat(&self, request: ChatCompletionRequest) -> Result<ByteStream, UpstreamError> {
        debug!(endpoint = %self.endpoint, model = %request.model, "sending chat completion request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "upstream rejected chat request");
            return Err(UpstreamError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let byte_stream = response
            .bytes_stream()
            .map_err(|e| UpstreamError::StreamError(e.to_string()));

        Ok(Box::pin(byte_stream))
    }
}
