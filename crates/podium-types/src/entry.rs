use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::kind::Kind;

/// Dense, insertion-ordered entry identifier.
///
/// Assigned only by the stream actor, starting at 0 with no gaps and no
/// reuse. The id doubles as the position of the entry in the backing
/// sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Position of this entry in the backing sequence.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntryId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for EntryId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, TypeError> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TypeError::InvalidId(s.to_string()))
    }
}

/// A comment or question as posted by a client, before the stream actor
/// admits it.
///
/// Carries no id and no timestamp; both are assigned by the stream actor
/// at admission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Free-text poster identity; empty means anonymous/guest.
    pub author: String,
    /// Free-text body; not validated at this layer.
    pub text: String,
    pub kind: Kind,
}

impl Submission {
    pub fn new(author: impl Into<String>, text: impl Into<String>, kind: Kind) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            kind,
        }
    }

    /// Admit this submission to the stream under the given id.
    pub fn into_entry(self, id: EntryId) -> Entry {
        Entry {
            id,
            author: self.author,
            text: self.text,
            kind: self.kind,
            score: 0,
            timestamp: Utc::now(),
            votes: HashMap::new(),
        }
    }
}

/// One comment or question admitted to the stream.
///
/// The vote ledger is private and not part of the public representation: a
/// serialized entry carries id, author, text, kind, score, and timestamp,
/// and deserializing one yields an empty ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub author: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub score: i64,
    pub timestamp: DateTime<Utc>,
    #[serde(skip)]
    votes: HashMap<String, i64>,
}

impl Entry {
    /// Record `voter`'s vote of `magnitude` and return the resulting score.
    ///
    /// The first vote per voter wins: a repeat vote leaves both the ledger
    /// and the score untouched and returns the unchanged score.
    pub fn cast_vote(&mut self, voter: impl Into<String>, magnitude: i64) -> i64 {
        let voter = voter.into();
        if !self.votes.contains_key(&voter) {
            self.votes.insert(voter, magnitude);
            self.score += magnitude;
        }
        self.score
    }

    /// Returns `true` if `voter` already appears in the vote ledger.
    pub fn has_voted(&self, voter: &str) -> bool {
        self.votes.contains_key(voter)
    }

    /// Number of distinct voters in the ledger.
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    /// Sum of every magnitude in the ledger.
    ///
    /// Always equals `score` for an entry mutated only through
    /// [`cast_vote`](Self::cast_vote).
    pub fn tally(&self) -> i64 {
        self.votes.values().sum()
    }
}

/// Presentation order by creation time: older entries first. Ids break
/// exact-timestamp ties, so the order is total.
pub fn by_recency(a: &Entry, b: &Entry) -> Ordering {
    a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id))
}

/// Ranking order: higher score first; among equal scores the earlier entry
/// wins; ids break exact-timestamp ties.
pub fn by_score(a: &Entry, b: &Entry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(a.timestamp.cmp(&b.timestamp))
        .then(a.id.cmp(&b.id))
}
