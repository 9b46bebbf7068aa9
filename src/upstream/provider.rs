//! Provider trait for the outbound chat call

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::Stream;
use std::pin::Pin;

use super::{error::UpstreamError, types::ChatCompletionRequest};

/// Raw reply body, chunk by chunk, exactly as the provider sent it
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, UpstreamError>> + Send>>;

/// Anything that can answer a chat-completion request with a byte stream
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the request and return the reply body as it arrives
    ///
    /// Resolves once the provider has answered with a success status. A
    /// non-success status, or a failure before the status arrives, is an
    /// error; failures after that surface as `Err` items in the stream.
    async fn stream_chat(&self, request: ChatCompletionRequest) -> Result<ByteStream, UpstreamError>;
}
