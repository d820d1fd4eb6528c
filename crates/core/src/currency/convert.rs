//! Currency conversion through the USD anchor.
//!
//! CRITICAL: Rounding strategy for money results:
//! - Always round to 2 decimal places
//! - Use banker's rounding (round half to even)

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use thiserror::Error;

use super::code::CurrencyCode;
use super::store::{RateStore, StorageError};

/// Conversion failure.
///
/// Display strings for the first three variants are the exact user-facing
/// messages; the API layer forwards them verbatim.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Amount did not parse as a decimal number.
    #[error("invalid number")]
    InvalidNumber,

    /// Amount parsed but is zero or negative.
    #[error("not positive")]
    NotPositive,

    /// Currency code is not in the store (or not a valid code at all).
    #[error("unknown currency")]
    UnknownCurrency(String),

    /// Rate store failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// Source amount.
    pub amount: Decimal,
    /// Source currency.
    pub from: CurrencyCode,
    /// Target currency.
    pub to: CurrencyCode,
    /// Converted amount, rounded to 2 decimal places.
    pub result: Decimal,
}

impl Conversion {
    /// Renders the result with exactly two decimal places, e.g. `"90.00"`.
    #[must_use]
    pub fn result_display(&self) -> String {
        format!("{:.2}", self.result)
    }
}

/// Rounds a money value to 2 decimal places.
///
/// Uses banker's rounding (`MidpointNearestEven`) which:
/// - Rounds 0.125 → 0.12 (to nearest even)
/// - Rounds 0.135 → 0.14 (to nearest even)
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Converts an amount between two currencies given their USD values.
///
/// `result = amount * from_usd_value / to_usd_value`, rounded to 2 decimal
/// places with banker's rounding. Both USD values must be positive; the
/// store guarantees that for anything it hands out.
#[must_use]
pub fn convert_amount(amount: Decimal, from_usd_value: Decimal, to_usd_value: Decimal) -> Decimal {
    round_money(amount * from_usd_value / to_usd_value)
}

/// Conversion engine over a rate store.
#[derive(Clone)]
pub struct Converter {
    store: Arc<dyn RateStore>,
}

impl Converter {
    /// Creates a converter over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn RateStore>) -> Self {
        Self { store }
    }

    /// Converts a positive amount between two stored currencies.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::NotPositive`] for amounts ≤ 0,
    /// [`ConvertError::UnknownCurrency`] when either code has no stored rate,
    /// and [`ConvertError::Storage`] when the store cannot be read.
    pub async fn convert(
        &self,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Conversion, ConvertError> {
        if amount <= Decimal::ZERO {
            return Err(ConvertError::NotPositive);
        }

        let from_rate = self
            .store
            .get(from)
            .await?
            .ok_or_else(|| ConvertError::UnknownCurrency(from.to_string()))?;
        let to_rate = self
            .store
            .get(to)
            .await?
            .ok_or_else(|| ConvertError::UnknownCurrency(to.to_string()))?;

        Ok(Conversion {
            amount,
            from: from_rate.code,
            to: to_rate.code,
            result: convert_amount(amount, from_rate.usd_value, to_rate.usd_value),
        })
    }

    /// Boundary form of [`Converter::convert`]: all three inputs as strings.
    ///
    /// The amount is parsed as a decimal (scientific notation accepted);
    /// codes are normalized, so `"eur"` and `"EUR"` behave identically. A
    /// syntactically invalid code is reported as unknown, since no such code
    /// can be stored.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InvalidNumber`] when the amount does not
    /// parse, plus everything [`Converter::convert`] returns.
    pub async fn convert_str(
        &self,
        amount: &str,
        from: &str,
        to: &str,
    ) -> Result<Conversion, ConvertError> {
        let amount = parse_amount(amount)?;
        let from = CurrencyCode::new(from)
            .map_err(|e| ConvertError::UnknownCurrency(e.0.trim().to_string()))?;
        let to = CurrencyCode::new(to)
            .map_err(|e| ConvertError::UnknownCurrency(e.0.trim().to_string()))?;
        self.convert(amount, &from, &to).await
    }
}

/// Parses a user-supplied amount.
///
/// Decimal has no NaN or infinity, so non-finite inputs fail the parse and
/// land on `InvalidNumber`.
fn parse_amount(raw: &str) -> Result<Decimal, ConvertError> {
    let trimmed = raw.trim();
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ConvertError::InvalidNumber)?;
    if amount <= Decimal::ZERO {
        return Err(ConvertError::NotPositive);
    }
    Ok(amount)
}
