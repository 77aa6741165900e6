use std::sync::Arc;

use analyzer_llms::Provider;
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
pub struct AppState {
    pub config: ServerConfig,
    /// Remote inference backend; tests substitute a fake
    pub gateway: Arc<dyn Provider>,
    /// Cancelled on shutdown; every inference call listens on a child token.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: ServerConfig, gateway: Arc<dyn Provider>) -> Arc<Self> {
        Arc::new(Self {
            config,
            gateway,
            shutdown: CancellationToken::new(),
        })
    }
}
