//! Stored rate types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::code::CurrencyCode;

/// USD value of one unit of a currency.
///
/// `usd_value` must be strictly positive; the store implementations enforce
/// this on write. USD itself is the anchor and always carries `usd_value = 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRate {
    /// Currency code.
    pub code: CurrencyCode,
    /// How many USD one unit of this currency is worth.
    pub usd_value: Decimal,
    /// When this rate was last written.
    pub updated_at: DateTime<Utc>,
}

impl CurrencyRate {
    /// Creates a rate stamped with the current time.
    #[must_use]
    pub fn new(code: CurrencyCode, usd_value: Decimal) -> Self {
        Self {
            code,
            usd_value,
            updated_at: Utc::now(),
        }
    }

    /// The USD anchor rate (`usd_value = 1`).
    #[must_use]
    pub fn usd_anchor() -> Self {
        Self::new(CurrencyCode::usd(), Decimal::ONE)
    }
}
