use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;

use podium_types::{Entry, EntryId, KindFilter, Submission};

use crate::error::StreamError;
use crate::message::StreamRequest;

/// How long a submitter waits for the actor's reply before giving up.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Cloneable async handle to a [`StreamActor`](crate::StreamActor).
///
/// Submitting a request blocks until the actor accepts it; the submitter
/// then waits on a private oneshot channel for the result. The reply wait
/// is bounded; a stalled actor surfaces as [`StreamError::Timeout`].
#[derive(Clone, Debug)]
pub struct StreamHandle {
    tx: mpsc::Sender<StreamRequest>,
    reply_timeout: Duration,
}

impl StreamHandle {
    pub fn new(tx: mpsc::Sender<StreamRequest>) -> Self {
        Self {
            tx,
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }

    /// Override the reply timeout.
    pub fn with_reply_timeout(mut self, reply_timeout: Duration) -> Self {
        self.reply_timeout = reply_timeout;
        self
    }

    /// Admit a submission and return the entry as stored, id assigned.
    pub async fn add(&self, submission: Submission) -> Result<Entry, StreamError> {
        let (reply, rx) = oneshot::channel();
        self.submit(StreamRequest::Add { submission, reply }, rx)
            .await?
    }

    /// Cast a vote on an existing entry and return the resulting score.
    ///
    /// First-vote-wins semantics apply per voter; an id outside the
    /// sequence fails with [`StreamError::EntryNotFound`].
    pub async fn vote(
        &self,
        id: EntryId,
        voter: impl Into<String>,
        magnitude: i64,
    ) -> Result<i64, StreamError> {
        let (reply, rx) = oneshot::channel();
        let request = StreamRequest::Vote {
            id,
            voter: voter.into(),
            magnitude,
            reply,
        };
        self.submit(request, rx).await?
    }

    /// All entries of matching kind created strictly after `since`, in
    /// insertion order.
    pub async fn list_by_recency(
        &self,
        filter: KindFilter,
        since: DateTime<Utc>,
    ) -> Result<Vec<Entry>, StreamError> {
        let (reply, rx) = oneshot::channel();
        self.submit(
            StreamRequest::ListByRecency {
                filter,
                since,
                reply,
            },
            rx,
        )
        .await
    }

    /// The top `limit` matching entries in ranking order; `None` means
    /// unbounded.
    pub async fn list_by_score(
        &self,
        filter: KindFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Entry>, StreamError> {
        let (reply, rx) = oneshot::channel();
        self.submit(
            StreamRequest::ListByScore {
                filter,
                limit,
                reply,
            },
            rx,
        )
        .await
    }

    /// Ask the actor to stop. Requests submitted afterwards fail with
    /// [`StreamError::Closed`].
    pub async fn close(&self) -> Result<(), StreamError> {
        self.tx
            .send(StreamRequest::Shutdown)
            .await
            .map_err(|_| StreamError::Closed)
    }

    async fn submit<T>(
        &self,
        request: StreamRequest,
        rx: oneshot::Receiver<T>,
    ) -> Result<T, StreamError> {
        self.tx
            .send(request)
            .await
            .map_err(|_| StreamError::Closed)?;
        match timeout(self.reply_timeout, rx).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(StreamError::Closed),
            Err(_) => Err(StreamError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use podium_types::Kind;

    use super::*;
    use crate::actor::StreamActor;

    #[tokio::test]
    async fn close_stops_the_actor() {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(StreamActor::new(rx).run());
        let handle = StreamHandle::new(tx);

        handle.close().await.unwrap();
        task.await.unwrap();

        let err = handle
            .add(Submission::new("alice", "anyone?", Kind::Comment))
            .await
            .unwrap_err();
        assert_eq!(err, StreamError::Closed);
    }

    #[tokio::test]
    async fn missing_reply_surfaces_as_timeout() {
        // No actor consumes the channel, so the buffered send succeeds and
        // the reply never arrives.
        let (tx, _rx) = mpsc::channel(1);
        let handle = StreamHandle::new(tx).with_reply_timeout(Duration::from_millis(20));

        let err = handle
            .add(Submission::new("alice", "hello?", Kind::Comment))
            .await
            .unwrap_err();
        assert_eq!(err, StreamError::Timeout);
    }

    #[tokio::test]
    async fn handles_share_one_actor() {
        let stream = crate::actor::spawn();
        let other = stream.clone();

        let entry = stream
            .add(Submission::new("alice", "shared", Kind::Question))
            .await
            .unwrap();
        let score = other.vote(entry.id, "bob", 1).await.unwrap();
        assert_eq!(score, 1);

        let listed = other
            .list_by_recency(KindFilter::Any, chrono::DateTime::UNIX_EPOCH)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].has_voted("bob"));
    }
}
