//! Foundation types for Podium.
//!
//! This crate provides the entry model shared by every other Podium crate:
//! the value type for one posted comment or question, its per-voter ledger,
//! and the two presentation orderings used by list queries.
//!
//! # Key Types
//!
//! - [`Entry`] — one admitted comment or question with its vote ledger
//! - [`EntryId`] — dense, insertion-ordered identifier assigned by the stream actor
//! - [`Kind`] — the closed Comment/Question classification
//! - [`KindFilter`] — the separate "any kind" wildcard used by queries
//! - [`Submission`] — a posted entry before it is admitted to the stream
//! - [`EntryView`] — per-viewer projection used in list responses

pub mod entry;
pub mod error;
pub mod kind;
pub mod view;

pub use entry::{by_recency, by_score, Entry, EntryId, Submission};
pub use error::TypeError;
pub use kind::{Kind, KindFilter};
pub use view::EntryView;
