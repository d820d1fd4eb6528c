//! Feed abstraction and payload parsing.

use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;

use crate::currency::CurrencyCode;

use super::report::SkipReason;

/// One fetched snapshot: the top-level JSON object, keyed as the feed keys it.
///
/// Values stay raw so that one malformed entry cannot poison the batch;
/// [`parse_entry`] classifies them one at a time.
pub type FeedSnapshot = serde_json::Map<String, Value>;

/// Feed-level failure. Aborts a sync before anything is written.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport failure or non-success HTTP status.
    #[error("Feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Body is not valid JSON.
    #[error("Feed returned malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Body is valid JSON but not an object.
    #[error("Feed payload is not a JSON object")]
    NotAnObject,
}

/// External source of currency rates.
#[async_trait]
pub trait RateFeed: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    /// Fetches one snapshot.
    async fn fetch(&self) -> Result<FeedSnapshot, FeedError>;
}

/// One feed entry successfully parsed into a storable rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRate {
    /// Normalized currency code.
    pub code: CurrencyCode,
    /// The entry's `inverseRate`: USD per one unit of `code`.
    pub usd_value: Decimal,
}

/// Parses one feed entry.
///
/// The entry must be an object carrying `code` (a three-letter string) and
/// `inverseRate` (a string or number parsing as a positive decimal). Extra
/// fields are ignored. Every rejection maps to a [`SkipReason`] so the sync
/// report can say exactly why an entry was dropped.
pub fn parse_entry(value: &Value) -> Result<FeedRate, SkipReason> {
    let Some(entry) = value.as_object() else {
        return Err(SkipReason::Malformed);
    };

    let code_raw = match entry.get("code") {
        None | Some(Value::Null) => return Err(SkipReason::MissingCode),
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            return Err(SkipReason::InvalidCode {
                code: other.to_string(),
            });
        }
    };
    let code = CurrencyCode::new(code_raw).map_err(|e| SkipReason::InvalidCode { code: e.0 })?;

    let rate_raw = match entry.get("inverseRate") {
        None | Some(Value::Null) => return Err(SkipReason::MissingRate),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(SkipReason::UnparseableRate {
                value: other.to_string(),
            });
        }
    };
    let usd_value = Decimal::from_str(&rate_raw)
        .or_else(|_| Decimal::from_scientific(&rate_raw))
        .map_err(|_| SkipReason::UnparseableRate {
            value: rate_raw.clone(),
        })?;
    if usd_value <= Decimal::ZERO {
        return Err(SkipReason::NonPositiveRate { value: rate_raw });
    }

    Ok(FeedRate { code, usd_value })
}
