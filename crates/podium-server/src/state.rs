use std::sync::Arc;

use podium_stream::StreamHandle;

use crate::config::ServerConfig;
use crate::upstream::{HttpUpstream, Upstream};

/// Shared state carried by every handler.
#[derive(Clone)]
pub struct AppState {
    pub stream: StreamHandle,
    pub config: Arc<ServerConfig>,
    pub upstream: Arc<dyn Upstream>,
}

impl AppState {
    /// Wire a fresh stream actor and an HTTP upstream from `config`.
    ///
    /// Must be called from within a tokio runtime: the actor task is
    /// spawned here.
    pub fn new(config: ServerConfig) -> Self {
        let upstream = Arc::new(HttpUpstream::from_config(&config));
        Self::with_upstream(config, upstream)
    }

    /// Wire a fresh stream actor with the given upstream. Tests use this
    /// to avoid real network calls.
    pub fn with_upstream(config: ServerConfig, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            stream: podium_stream::spawn(),
            config: Arc::new(config),
            upstream,
        }
    }
}
