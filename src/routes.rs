// Route definitions

use bytes::{Buf, BufMut, Bytes, BytesMut};
use futures::{Stream, TryStreamExt};
use std::convert::Infallible;
use tracing::warn;
use warp::http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use warp::http::StatusCode;
use warp::{Filter, Rejection};

use crate::handlers;
use crate::handlers::rejection::{BodyTooLarge, UnreadableBody};
use crate::state::AppState;

/// Largest chat request body accepted
pub const MAX_CHAT_BODY_BYTES: u64 = 1024 * 1024;

pub fn configure_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    // OPTIONS * (CORS preflight)
    let preflight = warp::options()
        .map(|| warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT));

    // GET /
    let home = warp::get()
        .and(warp::path::end())
        .and(with_state(state.clone()))
        .and_then(handlers::home_handler);

    // POST /api/chat
    let chat = warp::post()
        .and(warp::path("api"))
        .and(warp::path("chat"))
        .and(warp::path::end())
        .and(chat_body())
        .and(with_state(state.clone()))
        .and_then(handlers::chat_handler);

    // GET /{path..}
    let static_files = warp::get()
        .and(warp::path::tail())
        .and(with_state(state))
        .and_then(handlers::static_file_handler);

    preflight
        .or(home)
        .or(chat)
        .or(static_files)
        .recover(handlers::handle_rejection)
        .with(warp::reply::with::headers(cors_headers()))
        .with(warp::trace::request())
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Full chat request body, capped at `MAX_CHAT_BODY_BYTES`
///
/// A declared `Content-Length` over the cap is refused before reading.
/// Chunked bodies carry no length, so the cap is also enforced while reading.
fn chat_body() -> impl Filter<Extract = (Bytes,), Error = Rejection> + Clone {
    warp::header::optional::<u64>("content-length")
        .and_then(|declared: Option<u64>| async move {
            match declared {
                Some(len) if len > MAX_CHAT_BODY_BYTES => {
                    Err(warp::reject::custom(BodyTooLarge))
                }
                _ => Ok(()),
            }
        })
        .untuple_one()
        .and(warp::body::stream())
        .and_then(collect_body)
}

pub(crate) async fn collect_body<S, B>(body: S) -> Result<Bytes, Rejection>
where
    S: Stream<Item = Result<B, warp::Error>> + Send,
    B: Buf + Send,
{
    let mut body = Box::pin(body);
    let mut collected = BytesMut::new();

    while let Some(chunk) = body.try_next().await.map_err(|e| {
        warn!(error = %e, "failed to read chat request body");
        warp::reject::custom(UnreadableBody)
    })? {
        if (collected.len() + chunk.remaining()) as u64 > MAX_CHAT_BODY_BYTES {
            return Err(warp::reject::custom(BodyTooLarge));
        }
        collected.put(chunk);
    }

    Ok(collected.freeze())
}

/// Permissive CORS headers attached to every reply
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers
}
