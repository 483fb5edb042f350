use podium_types::EntryId;

/// Errors produced by stream operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    #[error("no entry with id {0}")]
    EntryNotFound(EntryId),

    #[error("stream is closed")]
    Closed,

    #[error("timed out waiting for the stream actor")]
    Timeout,
}
