// POST /api/chat handler
//
// Relays one user message to the chat-completions API and pipes the raw
// reply bytes back to the browser as they arrive.

use bytes::Bytes;
use futures::TryStreamExt;
use std::convert::Infallible;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{error, info, warn};
use warp::http::header::{HeaderValue, CONTENT_TYPE, TRANSFER_ENCODING};
use warp::http::StatusCode;
use warp::hyper::Body;
use warp::reply::Response;

use super::text_response;
use crate::models::ChatRequest;
use crate::state::AppState;
use crate::upstream::{build_chat_request, ByteStream, UpstreamError};

pub async fn chat_handler(body: Bytes, state: AppState) -> Result<Response, Infallible> {
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "rejecting malformed chat request");
            return Ok(text_response(StatusCode::BAD_REQUEST, "Invalid request"));
        }
    };

    info!(message_len = request.message.len(), "POST /api/chat");

    let upstream = &state.config.upstream;
    let payload = build_chat_request(upstream, request.message);

    // Dropping the future on expiry aborts the in-flight request
    let started = Instant::now();
    let outcome = match timeout(upstream.timeout, state.provider.stream_chat(payload)).await {
        Ok(result) => result,
        Err(_) => Err(UpstreamError::Timeout(upstream.timeout)),
    };

    match outcome {
        Ok(stream) => {
            info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "upstream answered, relaying stream"
            );
            Ok(relay_response(stream))
        }
        Err(e) => {
            error!(error = %e, status = ?e.status(), "upstream chat request failed");
            Ok(text_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("API request failed: {}", e),
            ))
        }
    }
}

/// Stream the upstream body through unchanged
///
/// The status is committed here, so a later upstream failure cannot become a
/// 500. The error is passed on to hyper instead, which aborts the chunked
/// body without its terminating chunk and the client sees a truncated reply.
fn relay_response(stream: ByteStream) -> Response {
    let relayed = stream.inspect_err(|e| {
        error!(error = %e, "upstream stream failed mid-relay, aborting response");
    });

    let mut response = Response::new(Body::wrap_stream(relayed));
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    headers.insert(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
    response
}
