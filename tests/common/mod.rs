#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use warp::hyper::Body;
use warp::Filter;

use coach_relay::config::ServerConfig;
use coach_relay::state::AppState;
use coach_relay::upstream::{
    ByteStream, ChatCompletionRequest, ChatProvider, UpstreamConfig, UpstreamError,
};

pub const HOME_HTML: &str = "<!doctype html><title>coach</title>";
pub const STYLE_CSS: &str = "body { margin: 0; }";

/// Chunks a healthy upstream sends, in SSE framing as the provider does
pub const UPSTREAM_CHUNKS: [&str; 3] = [
    "data: {\"choices\":[{\"delta\":{\"content\":\"Let's \"}}]}\n\n",
    "data: {\"choices\":[{\"delta\":{\"content\":\"talk.\"}}]}\n\n",
    "data: [DONE]\n\n",
];

pub fn upstream_body() -> String {
    UPSTREAM_CHUNKS.concat()
}

/// A static site in a temp dir, plus one file just outside its root
pub fn create_site() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let root = dir.path().join("public");
    std::fs::create_dir_all(root.join("img")).unwrap();
    std::fs::write(root.join("index.html"), HOME_HTML).unwrap();
    std::fs::write(root.join("style.css"), STYLE_CSS).unwrap();
    std::fs::write(root.join("app.js"), "console.log('hi');").unwrap();
    std::fs::write(root.join("data.json"), "{}").unwrap();
    std::fs::write(root.join("notes.txt"), "plain").unwrap();
    std::fs::write(root.join("img").join("logo.svg"), "<svg/>").unwrap();
    std::fs::write(dir.path().join("secret.txt"), "do not serve").unwrap();
    dir
}

pub fn site_root(dir: &TempDir) -> PathBuf {
    dir.path().join("public")
}

/// What the scripted provider does when called
pub enum Script {
    /// Succeed and stream these chunks
    Chunks(Vec<&'static str>),
    /// Fail with this HTTP status
    Status(u16),
    /// Never answer
    Hang,
}

/// In-process provider that records every request it receives
pub struct ScriptedProvider {
    script: Script,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatCompletionRequest>>,
    finished_hanging: AtomicBool,
}

impl ScriptedProvider {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            finished_hanging: AtomicBool::new(false),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// True only if a hanging call ran to completion instead of being dropped
    pub fn finished_hanging(&self) -> bool {
        self.finished_hanging.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn stream_chat(&self, request: ChatCompletionRequest) -> Result<ByteStream, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        match &self.script {
            Script::Chunks(chunks) => {
                let items: Vec<Result<Bytes, UpstreamError>> = chunks
                    .iter()
                    .copied()
                    .map(|chunk| Ok(Bytes::from_static(chunk.as_bytes())))
                    .collect();
                Ok(Box::pin(stream::iter(items)))
            }
            Script::Status(status) => Err(UpstreamError::HttpError {
                status: *status,
                body: "{\"error\":{\"message\":\"Authentication Fails\"}}".to_string(),
            }),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                self.finished_hanging.store(true, Ordering::SeqCst);
                Err(UpstreamError::StreamError("hang finished".to_string()))
            }
        }
    }
}

pub fn app_state(site: &TempDir, provider: Arc<dyn ChatProvider>, timeout: Duration) -> AppState {
    let config = ServerConfig::new("sk-test")
        .with_static_root(site_root(site))
        .with_upstream(UpstreamConfig::new("sk-test").with_timeout(timeout));
    AppState::new(config, provider)
}

/// Requests seen by the fake upstream: (authorization header, JSON body)
pub type Captured = Arc<Mutex<Vec<(String, serde_json::Value)>>>;

/// Start a fake chat-completions server on an ephemeral port
///
/// Routes:
/// - `POST /ok` streams `UPSTREAM_CHUNKS`
/// - `POST /unauthorized` answers 401
/// - `POST /slow` answers after five seconds
/// - `POST /broken` sends one chunk, then fails the body half a second later
pub fn spawn_fake_upstream() -> (SocketAddr, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));

    let capture = {
        let captured = captured.clone();
        warp::header::<String>("authorization")
            .and(warp::body::json::<serde_json::Value>())
            .map(move |auth: String, body: serde_json::Value| {
                captured.lock().unwrap().push((auth, body));
            })
            .untuple_one()
    };

    let ok = warp::post()
        .and(warp::path("ok"))
        .and(capture.clone())
        .map(|| {
            let chunks = UPSTREAM_CHUNKS
                .into_iter()
                .map(|chunk| Ok::<_, Infallible>(Bytes::from_static(chunk.as_bytes())));
            warp::http::Response::builder()
                .status(200)
                .header("content-type", "text/event-stream")
                .body(Body::wrap_stream(stream::iter(chunks)))
                .unwrap()
        });

    let unauthorized = warp::post()
        .and(warp::path("unauthorized"))
        .and(capture.clone())
        .map(|| {
            warp::http::Response::builder()
                .status(401)
                .body(Body::from("{\"error\":{\"message\":\"Authentication Fails\"}}"))
                .unwrap()
        });

    let slow = warp::post()
        .and(warp::path("slow"))
        .and(capture.clone())
        .and_then(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, Infallible>(warp::reply::with_status("late", warp::http::StatusCode::OK))
        });

    let broken = warp::post()
        .and(warp::path("broken"))
        .and(capture)
        .map(|| {
            let chunks = stream::iter(vec![Ok(Bytes::from_static(b"data: partial\n\n"))]).chain(
                stream::once(async {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    Err(std::io::Error::new(std::io::ErrorKind::Other, "upstream died"))
                }),
            );
            warp::http::Response::builder()
                .status(200)
                .body(Body::wrap_stream(chunks))
                .unwrap()
        });

    let routes = ok.or(unauthorized).or(slow).or(broken);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    (addr, captured)
}
