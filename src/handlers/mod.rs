// Handlers module

pub mod chat;
pub mod home;
pub mod rejection;
pub mod static_file;

pub use chat::chat_handler;
pub use home::home_handler;
pub use rejection::handle_rejection;
pub use static_file::static_file_handler;

use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

/// Plain-text reply with the given status
pub(crate) fn text_response(status: StatusCode, body: impl Into<String>) -> Response {
    warp::reply::with_status(body.into(), status).into_response()
}
