use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use podium_types::{by_score, Entry, EntryId, KindFilter, Submission};

use crate::error::StreamError;
use crate::handle::StreamHandle;
use crate::message::StreamRequest;

/// Requests queued beyond the one being processed.
const REQUEST_CAPACITY: usize = 1;

/// Single-consumer owner of the entry sequence.
///
/// No lock guards `entries`: the run loop is the only code that ever touches
/// it, and it handles each request to completion before receiving the next.
pub struct StreamActor {
    entries: Vec<Entry>,
    rx: mpsc::Receiver<StreamRequest>,
}

/// Spawn a stream actor on the current runtime and return a handle to it.
///
/// The actor runs until [`StreamHandle::close`] is called or every handle
/// is dropped.
pub fn spawn() -> StreamHandle {
    let (tx, rx) = mpsc::channel(REQUEST_CAPACITY);
    tokio::spawn(StreamActor::new(rx).run());
    StreamHandle::new(tx)
}

impl StreamActor {
    pub fn new(rx: mpsc::Receiver<StreamRequest>) -> Self {
        Self {
            entries: Vec::new(),
            rx,
        }
    }

    /// Process requests until shutdown or until every sender is dropped.
    ///
    /// A failed request — an unknown entry id, a reply receiver that went
    /// away — is contained to that request's reply; the loop keeps serving.
    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            tracing::trace!(request = request.name(), "handling stream request");
            match request {
                StreamRequest::Add { submission, reply } => {
                    let _ = reply.send(Ok(self.add(submission)));
                }
                StreamRequest::Vote {
                    id,
                    voter,
                    magnitude,
                    reply,
                } => {
                    let _ = reply.send(self.vote(id, &voter, magnitude));
                }
                StreamRequest::ListByRecency {
                    filter,
                    since,
                    reply,
                } => {
                    let _ = reply.send(self.list_by_recency(filter, since));
                }
                StreamRequest::ListByScore {
                    filter,
                    limit,
                    reply,
                } => {
                    let _ = reply.send(self.list_by_score(filter, limit));
                }
                StreamRequest::Shutdown => {
                    tracing::debug!(entries = self.entries.len(), "stream actor shutting down");
                    break;
                }
            }
        }
    }

    /// Admit a submission. The id is the current sequence length, which
    /// keeps ids dense and strictly increasing while requests are
    /// serialized.
    fn add(&mut self, submission: Submission) -> Entry {
        let id = EntryId::new(self.entries.len() as u64);
        let entry = submission.into_entry(id);
        self.entries.push(entry.clone());
        tracing::debug!(%id, kind = %entry.kind, "entry admitted");
        entry
    }

    fn vote(&mut self, id: EntryId, voter: &str, magnitude: i64) -> Result<i64, StreamError> {
        let entry = self
            .entries
            .get_mut(id.index())
            .ok_or(StreamError::EntryNotFound(id))?;
        Ok(entry.cast_vote(voter, magnitude))
    }

    fn list_by_recency(&self, filter: KindFilter, since: DateTime<Utc>) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|e| filter.matches(e.kind) && e.timestamp > since)
            .cloned()
            .collect()
    }

    fn list_by_score(&self, filter: KindFilter, limit: Option<usize>) -> Vec<Entry> {
        let mut ranked: Vec<Entry> = self
            .entries
            .iter()
            .filter(|e| filter.matches(e.kind))
            .cloned()
            .collect();
        ranked.sort_by(by_score);
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        ranked
    }
}
