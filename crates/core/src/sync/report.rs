//! Sync outcome reporting.

use thiserror::Error;

/// Why a feed entry was not applied to the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// Entry is not a JSON object.
    #[error("entry is not a JSON object")]
    Malformed,

    /// Entry has no `code` field.
    #[error("entry has no currency code")]
    MissingCode,

    /// `code` is not three ASCII letters.
    #[error("invalid currency code: {code}")]
    InvalidCode {
        /// The offending code as it appeared in the feed.
        code: String,
    },

    /// Entry has no `inverseRate` field.
    #[error("entry has no inverse rate")]
    MissingRate,

    /// `inverseRate` does not parse as a decimal number.
    #[error("inverse rate does not parse as a decimal: {value}")]
    UnparseableRate {
        /// The offending value as it appeared in the feed.
        value: String,
    },

    /// `inverseRate` is zero or negative.
    #[error("inverse rate is not positive: {value}")]
    NonPositiveRate {
        /// The offending value as it appeared in the feed.
        value: String,
    },

    /// Entry is the USD anchor, which stays pinned at 1.
    #[error("reference currency stays pinned at 1")]
    ReferenceCurrency,
}

/// One skipped feed entry: the feed's key plus the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Top-level key of the entry in the feed payload.
    pub key: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// What one sync run did to the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Rates created, including a freshly seeded USD anchor.
    pub inserted: usize,
    /// Rates whose value was overwritten.
    pub updated: usize,
    /// Entries dropped, each with its reason.
    pub skipped: Vec<SkippedEntry>,
}

impl SyncReport {
    /// Total number of rates written.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.inserted + self.updated
    }

    /// Number of entries dropped.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}
