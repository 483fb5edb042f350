//! Single-writer stream actor for Podium.
//!
//! This crate is the heart of Podium. It provides:
//! - The request/reply message protocol ([`StreamRequest`])
//! - [`StreamActor`], the single-consumer loop that owns the entry sequence
//!   and is the only assigner of entry ids
//! - [`StreamHandle`], the cloneable async handle request handlers talk to
//!
//! Every operation — mutations and queries alike — passes through one
//! bounded channel and is handled strictly one at a time. That total order
//! is what makes id assignment and per-voter deduplication race-free with
//! no locks: there is exactly one mutator, and it never runs concurrently
//! with itself.

pub mod actor;
pub mod error;
pub mod handle;
pub mod message;

pub use actor::{spawn, StreamActor};
pub use error::StreamError;
pub use handle::StreamHandle;
pub use message::StreamRequest;
