// GET /<path> handler

use std::convert::Infallible;
use tracing::debug;
use warp::http::header::{HeaderValue, CONTENT_TYPE};
use warp::http::StatusCode;
use warp::hyper::Body;
use warp::path::Tail;
use warp::reply::Response;

use super::text_response;
use crate::state::AppState;
use crate::static_files::{content_type_for, resolve_static_path};

pub async fn static_file_handler(tail: Tail, state: AppState) -> Result<Response, Infallible> {
    let Some(path) = resolve_static_path(&state.config.static_root, tail.as_str()) else {
        debug!(path = tail.as_str(), "refusing static path outside the site root");
        return Ok(not_found());
    };

    match tokio::fs::read(&path).await {
        Ok(content) => {
            let mut response = Response::new(Body::from(content));
            response.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_static(content_type_for(&path)),
            );
            Ok(response)
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "static file unavailable");
            Ok(not_found())
        }
    }
}

fn not_found() -> Response {
    text_response(StatusCode::NOT_FOUND, "Not found")
}
