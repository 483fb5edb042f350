use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use podium_types::{Entry, EntryId, KindFilter, Submission};

use crate::error::StreamError;

/// One request to the stream actor, carrying its own reply channel.
///
/// Queries travel the same channel as mutations: every request executes on
/// the actor's task, one at a time, so no reader ever observes the entry
/// sequence mid-mutation.
#[derive(Debug)]
pub enum StreamRequest {
    /// Admit a submission; replies with the entry as stored, id assigned.
    Add {
        submission: Submission,
        reply: oneshot::Sender<Result<Entry, StreamError>>,
    },
    /// Apply a vote to an existing entry; replies with the resulting score.
    Vote {
        id: EntryId,
        voter: String,
        magnitude: i64,
        reply: oneshot::Sender<Result<i64, StreamError>>,
    },
    /// All entries of matching kind created strictly after `since`, in
    /// insertion order.
    ListByRecency {
        filter: KindFilter,
        since: DateTime<Utc>,
        reply: oneshot::Sender<Vec<Entry>>,
    },
    /// The top `limit` matching entries in ranking order; `None` means
    /// unbounded.
    ListByScore {
        filter: KindFilter,
        limit: Option<usize>,
        reply: oneshot::Sender<Vec<Entry>>,
    },
    /// Stop the processing loop. In-flight requests are not guaranteed a
    /// reply.
    Shutdown,
}

impl StreamRequest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "Add",
            Self::Vote { .. } => "Vote",
            Self::ListByRecency { .. } => "ListByRecency",
            Self::ListByScore { .. } => "ListByScore",
            Self::Shutdown => "Shutdown",
        }
    }
}
