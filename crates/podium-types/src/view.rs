use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryId};
use crate::kind::Kind;

/// Per-viewer projection of an [`Entry`] for list responses.
///
/// The entry's public representation plus `voted`: whether the requesting
/// author already appears in the entry's vote ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryView {
    pub id: EntryId,
    pub author: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub score: i64,
    pub voted: bool,
    pub timestamp: DateTime<Utc>,
}

impl EntryView {
    /// Project `entry` for the given viewer.
    pub fn for_viewer(entry: &Entry, viewer: &str) -> Self {
        Self {
            id: entry.id,
            author: entry.author.clone(),
            text: entry.text.clone(),
            kind: entry.kind,
            score: entry.score,
            voted: entry.has_voted(viewer),
            timestamp: entry.timestamp,
        }
    }
}
