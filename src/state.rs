// Shared, read-only per-process state

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::upstream::ChatProvider;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub provider: Arc<dyn ChatProvider>,
}

impl AppState {
    pub fn new(config: ServerConfig, provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }
}
