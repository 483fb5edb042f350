use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use podium_stream::StreamError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid entry id: {0:?}")]
    InvalidId(String),

    #[error("stream error: {0}")]
    Stream(#[from] StreamError),

    #[error("{service} service is not configured")]
    UpstreamUnavailable { service: &'static str },

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::Stream(StreamError::EntryNotFound(_)) => StatusCode::NOT_FOUND,
            Self::UpstreamUnavailable { .. } | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A fault in one request is contained to that request's response;
/// server-side faults are logged.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
