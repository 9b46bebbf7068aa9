use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coach_relay::config::{ServerConfig, STATIC_ROOT_VAR};
use coach_relay::handlers::home::HOME_PAGE;
use coach_relay::routes::configure_routes;
use coach_relay::state::AppState;
use coach_relay::upstream::ChatCompletionsClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().context("failed to load configuration")?;
    let provider =
        ChatCompletionsClient::new(&config.upstream).context("failed to create upstream client")?;

    let port = config.port;
    info!(
        static_root = %config.static_root.display(),
        upstream = ?config.upstream,
        "starting server"
    );

    if !config.static_root.join(HOME_PAGE).is_file() {
        warn!(
            static_root = %config.static_root.display(),
            "no {} in the static root, GET / will fail; set {}",
            HOME_PAGE,
            STATIC_ROOT_VAR
        );
    }

    let routes = configure_routes(AppState::new(config, Arc::new(provider)));

    let (addr, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown(([0, 0, 0, 0], port), async {
            tokio::signal::ctrl_c().await.ok();
        })
        .with_context(|| format!("failed to bind to port {}", port))?;

    info!("Server running at http://localhost:{}", addr.port());
    server.await;
    info!("server stopped");

    Ok(())
}
