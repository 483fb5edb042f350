use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Podium HTTP server.
pub struct PodiumServer {
    config: ServerConfig,
}

impl PodiumServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router with freshly wired state (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState::new(self.config.clone()))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let state = AppState::new(self.config.clone());
        let app = build_router(state);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("podium server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
