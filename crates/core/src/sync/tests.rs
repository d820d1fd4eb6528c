//! Sync service tests against the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use crate::currency::{CurrencyCode, CurrencyRate, MemoryRateStore, RateStore};

use super::feed::{FeedError, FeedSnapshot, RateFeed};
use super::report::SkipReason;
use super::service::{SyncError, SyncService};

/// Feed returning a fixed JSON payload.
struct StaticFeed(Value);

#[async_trait]
impl RateFeed for StaticFeed {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<FeedSnapshot, FeedError> {
        match &self.0 {
            Value::Object(map) => Ok(map.clone()),
            _ => Err(FeedError::NotAnObject),
        }
    }
}

/// Feed that always fails at the transport/decode level.
struct FailingFeed;

#[async_trait]
impl RateFeed for FailingFeed {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch(&self) -> Result<FeedSnapshot, FeedError> {
        let err = serde_json::from_str::<Value>("{").expect_err("payload is truncated");
        Err(FeedError::Json(err))
    }
}

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s).expect("valid code")
}

fn service(store: Arc<MemoryRateStore>, payload: Value) -> SyncService {
    SyncService::new(store, Arc::new(StaticFeed(payload)))
}

async fn contents(store: &MemoryRateStore) -> Vec<(String, Decimal)> {
    store
        .list_all()
        .await
        .expect("store should read")
        .into_iter()
        .map(|r| (r.code.as_str().to_string(), r.usd_value))
        .collect()
}

#[tokio::test]
async fn test_sync_seeds_usd_and_inserts_entries() {
    let store = Arc::new(MemoryRateStore::new());
    let sync = service(
        Arc::clone(&store),
        json!({"eur": {"code": "EUR", "inverseRate": "0.91"}}),
    );

    let report = sync.sync().await.expect("sync should succeed");
    assert_eq!(report.inserted, 2);
    assert_eq!(report.updated, 0);
    assert!(report.skipped.is_empty());

    let eur = store
        .get(&code("EUR"))
        .await
        .expect("store should read")
        .expect("EUR should exist");
    assert_eq!(eur.usd_value, dec!(0.91));

    let usd = store
        .get(&code("USD"))
        .await
        .expect("store should read")
        .expect("USD should exist");
    assert_eq!(usd.usd_value, Decimal::ONE);
}

#[tokio::test]
async fn test_sync_is_idempotent_for_identical_feed() {
    let store = Arc::new(MemoryRateStore::new());
    let payload = json!({
        "eur": {"code": "EUR", "inverseRate": "0.91"},
        "jpy": {"code": "JPY", "inverseRate": 0.0068}
    });
    let sync = service(Arc::clone(&store), payload);

    let first = sync.sync().await.expect("sync should succeed");
    assert_eq!(first.inserted, 3);
    assert_eq!(first.updated, 0);
    let after_first = contents(&store).await;

    let second = sync.sync().await.expect("sync should succeed");
    assert_eq!(second.inserted, 0);
    assert_eq!(second.updated, 2);
    assert_eq!(contents(&store).await, after_first);
}

#[tokio::test]
async fn test_sync_updates_existing_rate() {
    let store = Arc::new(MemoryRateStore::new());
    store
        .upsert(CurrencyRate::new(code("EUR"), dec!(0.5)))
        .await
        .expect("store should write");

    let sync = service(
        Arc::clone(&store),
        json!({"eur": {"code": "EUR", "inverseRate": "0.91"}}),
    );
    let report = sync.sync().await.expect("sync should succeed");

    // USD seeded, EUR overwritten.
    assert_eq!(report.inserted, 1);
    assert_eq!(report.updated, 1);
    let eur = store
        .get(&code("EUR"))
        .await
        .expect("store should read")
        .expect("EUR should exist");
    assert_eq!(eur.usd_value, dec!(0.91));
}

#[tokio::test]
async fn test_sync_never_overwrites_usd_anchor() {
    let store = Arc::new(MemoryRateStore::new());
    store
        .upsert(CurrencyRate::usd_anchor())
        .await
        .expect("store should write");

    let sync = service(
        Arc::clone(&store),
        json!({"usd": {"code": "USD", "inverseRate": "0.5"}}),
    );
    let report = sync.sync().await.expect("sync should succeed");

    assert_eq!(report.inserted, 0);
    assert_eq!(report.updated, 0);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].key, "usd");
    assert_eq!(report.skipped[0].reason, SkipReason::ReferenceCurrency);

    let usd = store
        .get(&code("USD"))
        .await
        .expect("store should read")
        .expect("USD should exist");
    assert_eq!(usd.usd_value, Decimal::ONE);
}

#[tokio::test]
async fn test_feed_failure_leaves_store_untouched() {
    let store = Arc::new(MemoryRateStore::new());
    store
        .upsert(CurrencyRate::new(code("EUR"), dec!(0.9)))
        .await
        .expect("store should write");
    let before = contents(&store).await;

    let sync = SyncService::new(Arc::<MemoryRateStore>::clone(&store), Arc::new(FailingFeed));
    let err = sync.sync().await.expect_err("sync should fail");
    assert!(matches!(err, SyncError::Feed(FeedError::Json(_))));

    // Nothing written, not even the USD seed.
    assert_eq!(contents(&store).await, before);
}

#[tokio::test]
async fn test_non_object_payload_is_a_feed_error() {
    let store = Arc::new(MemoryRateStore::new());
    let sync = service(Arc::clone(&store), json!(["EUR", "JPY"]));

    let err = sync.sync().await.expect_err("sync should fail");
    assert!(matches!(err, SyncError::Feed(FeedError::NotAnObject)));
    assert!(contents(&store).await.is_empty());
}

#[tokio::test]
async fn test_bad_entries_skipped_good_entries_applied() {
    let store = Arc::new(MemoryRateStore::new());
    let sync = service(
        Arc::clone(&store),
        json!({
            "gbp": {"code": "GBP", "inverseRate": "1.27"},
            "nocode": {"inverseRate": "2.0"},
            "badrate": {"code": "CHF", "inverseRate": "abc"},
            "negative": {"code": "SEK", "inverseRate": "-1"},
            "scalar": "not an object"
        }),
    );

    let report = sync.sync().await.expect("sync should succeed");
    assert_eq!(report.inserted, 2); // USD seed + GBP
    assert_eq!(report.updated, 0);
    assert_eq!(report.skipped_count(), 4);

    let reason_for = |key: &str| {
        report
            .skipped
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.reason.clone())
            .expect("entry should be recorded")
    };
    assert_eq!(reason_for("nocode"), SkipReason::MissingCode);
    assert_eq!(
        reason_for("badrate"),
        SkipReason::UnparseableRate {
            value: "abc".to_string()
        }
    );
    assert_eq!(
        reason_for("negative"),
        SkipReason::NonPositiveRate {
            value: "-1".to_string()
        }
    );
    assert_eq!(reason_for("scalar"), SkipReason::Malformed);

    // The two bad rates were never stored.
    assert_eq!(
        contents(&store).await,
        vec![
            ("GBP".to_string(), dec!(1.27)),
            ("USD".to_string(), Decimal::ONE)
        ]
    );
}

#[tokio::test]
async fn test_empty_feed_still_seeds_usd() {
    let store = Arc::new(MemoryRateStore::new());
    let sync = service(Arc::clone(&store), json!({}));

    let report = sync.sync().await.expect("sync should succeed");
    assert_eq!(report.inserted, 1);
    assert_eq!(contents(&store).await, vec![("USD".to_string(), Decimal::ONE)]);
}
