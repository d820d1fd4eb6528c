//! Rate feed synchronization.
//!
//! A [`SyncService`] pulls one snapshot from a [`RateFeed`] and upserts it
//! into the rate store, entry by entry. Bad entries are skipped and recorded,
//! never fatal; a failed fetch aborts before anything is written.

pub mod feed;
pub mod floatrates;
pub mod report;
pub mod service;

#[cfg(test)]
mod tests;

pub use feed::{parse_entry, FeedError, FeedRate, FeedSnapshot, RateFeed};
pub use floatrates::FloatRatesFeed;
pub use report::{SkipReason, SkippedEntry, SyncReport};
pub use service::{SyncError, SyncService};
