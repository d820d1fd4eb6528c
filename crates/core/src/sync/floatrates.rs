//! HTTP rate feed client.

use std::time::Duration;

use async_trait::async_trait;
use florin_shared::config::FeedConfig;
use serde_json::Value;
use tracing::debug;

use super::feed::{FeedError, FeedSnapshot, RateFeed};

/// Feed over a floatrates-style JSON endpoint.
///
/// The endpoint returns one JSON object mapping feed keys to per-currency
/// entries; everything past "is it an object" is left to per-entry parsing.
pub struct FloatRatesFeed {
    client: reqwest::Client,
    url: String,
}

impl FloatRatesFeed {
    /// Builds the feed client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("florin/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl RateFeed for FloatRatesFeed {
    fn name(&self) -> &str {
        "floatrates"
    }

    async fn fetch(&self) -> Result<FeedSnapshot, FeedError> {
        debug!(url = %self.url, "Fetching rate feed");

        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let value: Value = serde_json::from_str(&body)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(FeedError::NotAnObject),
        }
    }
}
