//! Rate feed synchronization job for Florin.
//!
//! Fetches one snapshot from the configured rate feed and reconciles it
//! against the rate store: new currencies are inserted, known ones are
//! overwritten, unusable entries are skipped and reported. Intended to be
//! run from cron; the feed publishes daily.
//!
//! Usage: cargo run --bin ratesync

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use florin_core::sync::{FloatRatesFeed, SyncService};
use florin_db::{CurrencyRateRepository, connect};
use florin_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ratesync=debug,florin_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database).await?;
    info!("Connected to database");

    let store = Arc::new(CurrencyRateRepository::new(db));
    let feed = Arc::new(FloatRatesFeed::new(&config.feed)?);

    // One sync pass; a feed or storage failure exits non-zero
    let report = SyncService::new(store, feed).sync().await?;

    info!(
        inserted = report.inserted,
        updated = report.updated,
        skipped = report.skipped_count(),
        "ratesync finished"
    );

    Ok(())
}
