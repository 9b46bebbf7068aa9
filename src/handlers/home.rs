// GET / handler

use std::convert::Infallible;
use tracing::error;
use warp::http::header::{HeaderValue, CONTENT_TYPE};
use warp::http::StatusCode;
use warp::hyper::Body;
use warp::reply::Response;

use super::text_response;
use crate::state::AppState;

pub const HOME_PAGE: &str = "index.html";

pub async fn home_handler(state: AppState) -> Result<Response, Infallible> {
    let path = state.config.static_root.join(HOME_PAGE);

    match tokio::fs::read(&path).await {
        Ok(content) => {
            let mut response = Response::new(Body::from(content));
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
            Ok(response)
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to read home page");
            Ok(text_response(StatusCode::INTERNAL_SERVER_ERROR, "Server error"))
        }
    }
}
