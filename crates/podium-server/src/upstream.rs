use async_trait::async_trait;

use podium_types::Entry;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// A response relayed from a collaborator service, verbatim.
#[derive(Clone, Debug)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

/// Outbound side of the server: similarity and sentiment lookups, plus the
/// fire-and-forget fan-out of newly added entries to peer servers.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn similar(&self, text: &str) -> ServerResult<UpstreamReply>;

    async fn sentiment(&self, text: &str) -> ServerResult<UpstreamReply>;

    /// Send a copy of a newly admitted entry to every configured peer.
    /// Failures are logged and dropped; fan-out is not a consistency
    /// protocol.
    async fn broadcast(&self, entry: &Entry);
}

/// [`Upstream`] implementation backed by reqwest.
pub struct HttpUpstream {
    client: reqwest::Client,
    similar_addr: Option<String>,
    senti_addr: Option<String>,
    peers: Vec<String>,
}

impl HttpUpstream {
    pub fn new(
        similar_addr: Option<String>,
        senti_addr: Option<String>,
        peers: Vec<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            similar_addr,
            senti_addr,
            peers,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.similar_addr.clone(),
            config.senti_addr.clone(),
            config.peers.clone(),
        )
    }

    async fn relay(
        &self,
        base: Option<&str>,
        service: &'static str,
        route: &str,
        text: &str,
    ) -> ServerResult<UpstreamReply> {
        let base = base.ok_or(ServerError::UpstreamUnavailable { service })?;
        let response = self
            .client
            .get(format!("{base}{route}"))
            .query(&[("text", text)])
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(UpstreamReply { status, body })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn similar(&self, text: &str) -> ServerResult<UpstreamReply> {
        self.relay(self.similar_addr.as_deref(), "similarity", "/similar", text)
            .await
    }

    async fn sentiment(&self, text: &str) -> ServerResult<UpstreamReply> {
        self.relay(self.senti_addr.as_deref(), "sentiment", "/sentiment", text)
            .await
    }

    async fn broadcast(&self, entry: &Entry) {
        for peer in &self.peers {
            let form = [
                ("author", entry.author.as_str()),
                ("text", entry.text.as_str()),
                ("type", entry.kind.code()),
            ];
            let result = self
                .client
                .post(format!("{peer}/add"))
                .form(&form)
                .send()
                .await;
            match result {
                Ok(response) => {
                    tracing::debug!(peer = %peer, status = %response.status(), id = %entry.id, "entry forwarded")
                }
                Err(error) => {
                    tracing::warn!(peer = %peer, %error, id = %entry.id, "entry fan-out failed")
                }
            }
        }
    }
}

/// Upstream that answers nothing and forwards nowhere. Used by tests and by
/// deployments without collaborator services.
pub struct NoOpUpstream;

#[async_trait]
impl Upstream for NoOpUpstream {
    async fn similar(&self, _text: &str) -> ServerResult<UpstreamReply> {
        Err(ServerError::UpstreamUnavailable {
            service: "similarity",
        })
    }

    async fn sentiment(&self, _text: &str) -> ServerResult<UpstreamReply> {
        Err(ServerError::UpstreamUnavailable {
            service: "sentiment",
        })
    }

    async fn broadcast(&self, _entry: &Entry) {}
}
