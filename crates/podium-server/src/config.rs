use std::net::SocketAddr;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Runtime configuration for the Podium server.
///
/// Handlers only ever see this struct, carried in the router state; there
/// is no process-global configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Width of the `/recent` window, in seconds.
    pub recent_window_secs: u64,
    /// How many entries `/top` returns.
    pub top_limit: usize,
    /// Base URL of the similarity service, e.g. `http://similar.internal:9090`.
    pub similar_addr: Option<String>,
    /// Base URL of the sentiment service.
    pub senti_addr: Option<String>,
    /// Peer servers that receive a copy of every added entry.
    pub peers: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().unwrap(),
            recent_window_secs: 600,
            top_limit: 100,
            similar_addr: None,
            senti_addr: None,
            peers: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file. Missing keys fall back to
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// The `/recent` cutoff relative to `now`.
    pub fn recent_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::seconds(self.recent_window_secs as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.recent_window_secs, 600);
        assert_eq!(c.top_limit, 100);
        assert!(c.similar_addr.is_none());
        assert!(c.senti_addr.is_none());
        assert!(c.peers.is_empty());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: ServerConfig = toml::from_str(
            r#"
            bind_addr = "0.0.0.0:9000"
            peers = ["http://replica:8080"]
            "#,
        )
        .unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.peers, vec!["http://replica:8080".to_string()]);
        assert_eq!(c.recent_window_secs, 600);
    }

    #[test]
    fn recent_cutoff_subtracts_the_window() {
        let c = ServerConfig {
            recent_window_secs: 60,
            ..ServerConfig::default()
        };
        let now = Utc::now();
        assert_eq!(c.recent_cutoff(now), now - Duration::seconds(60));
    }

    #[test]
    fn toml_round_trip() {
        let mut c = ServerConfig::default();
        c.similar_addr = Some("http://similar:9090".into());
        let raw = toml::to_string(&c).unwrap();
        let parsed: ServerConfig = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.bind_addr, c.bind_addr);
        assert_eq!(parsed.similar_addr, c.similar_addr);
    }
}
