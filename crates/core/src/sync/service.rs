//! Feed-to-store synchronization.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::currency::{CurrencyCode, CurrencyRate, RateStore, StorageError, UpsertOutcome};

use super::feed::{parse_entry, FeedError, RateFeed};
use super::report::{SkipReason, SkippedEntry, SyncReport};

/// Fatal sync failure.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The feed could not be fetched or decoded; nothing was written.
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// A store write failed; entries already upserted remain.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Pulls one feed snapshot and applies it to the rate store.
pub struct SyncService {
    store: Arc<dyn RateStore>,
    feed: Arc<dyn RateFeed>,
}

impl SyncService {
    /// Creates a sync service over the given store and feed.
    #[must_use]
    pub fn new(store: Arc<dyn RateStore>, feed: Arc<dyn RateFeed>) -> Self {
        Self { store, feed }
    }

    /// Runs one sync pass.
    ///
    /// Fetches first, so a feed failure leaves the store untouched. Then
    /// seeds the USD anchor if absent, and upserts every parseable entry.
    /// Unparseable entries are skipped and recorded; USD entries in the feed
    /// are skipped so the anchor never drifts from 1.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Feed`] when the fetch fails and
    /// [`SyncError::Storage`] when a store access fails mid-run.
    pub async fn sync(&self) -> Result<SyncReport, SyncError> {
        let snapshot = self.feed.fetch().await?;
        info!(
            source = self.feed.name(),
            entries = snapshot.len(),
            "Fetched rate feed"
        );

        let mut report = SyncReport::default();
        self.ensure_reference(&mut report).await?;

        let reference = CurrencyCode::usd();
        for (key, value) in &snapshot {
            match parse_entry(value) {
                Ok(rate) if rate.code == reference => {
                    debug!(key = %key, "Skipping reference currency entry");
                    report.skipped.push(SkippedEntry {
                        key: key.clone(),
                        reason: SkipReason::ReferenceCurrency,
                    });
                }
                Ok(rate) => {
                    let outcome = self
                        .store
                        .upsert(CurrencyRate::new(rate.code, rate.usd_value))
                        .await?;
                    match outcome {
                        UpsertOutcome::Inserted => report.inserted += 1,
                        UpsertOutcome::Updated => report.updated += 1,
                    }
                }
                Err(reason) => {
                    warn!(key = %key, reason = %reason, "Skipping feed entry");
                    report.skipped.push(SkippedEntry {
                        key: key.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            inserted = report.inserted,
            updated = report.updated,
            skipped = report.skipped_count(),
            "Rate sync complete"
        );
        Ok(report)
    }

    /// Inserts `USD = 1` when absent. Never overwrites an existing anchor.
    async fn ensure_reference(&self, report: &mut SyncReport) -> Result<(), StorageError> {
        let usd = CurrencyCode::usd();
        if self.store.get(&usd).await?.is_none() {
            self.store.upsert(CurrencyRate::usd_anchor()).await?;
            report.inserted += 1;
            info!("Seeded reference currency USD at 1");
        }
        Ok(())
    }
}
