// Converts unmatched requests into plain-text replies

use std::convert::Infallible;
use warp::http::StatusCode;
use warp::reject::Reject;
use warp::reply::Response;
use warp::Rejection;

use super::text_response;

/// Chat body over the size cap
#[derive(Debug)]
pub struct BodyTooLarge;

impl Reject for BodyTooLarge {}

/// Chat body could not be read off the connection
#[derive(Debug)]
pub struct UnreadableBody;

impl Reject for UnreadableBody {}

pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    if err.find::<BodyTooLarge>().is_some() {
        return Ok(text_response(StatusCode::PAYLOAD_TOO_LARGE, "Payload too large"));
    }
    if err.find::<UnreadableBody>().is_some() {
        return Ok(text_response(StatusCode::BAD_REQUEST, "Invalid request"));
    }

    // Unknown paths and unsupported methods alike
    Ok(text_response(StatusCode::NOT_FOUND, "Not found"))
}
