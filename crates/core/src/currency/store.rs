//! Rate store interface and the in-memory implementation.
//!
//! Core code only ever talks to [`RateStore`]; the PostgreSQL-backed
//! repository lives in the db crate and implements the same trait. The
//! in-memory store backs unit tests and in-process API tests.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use super::code::CurrencyCode;
use super::rate::CurrencyRate;

/// Error accessing the rate store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Write rejected by a store constraint.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Underlying storage backend failed.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Whether an upsert created a new record or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record existed for the code; one was created.
    Inserted,
    /// A record existed; its value was overwritten.
    Updated,
}

/// Durable mapping from currency code to USD value.
///
/// `upsert` is atomic per call: a concurrent reader observes either the old
/// or the new value for a code, never a torn one.
#[async_trait]
pub trait RateStore: Send + Sync {
    /// Looks up the rate for a code.
    async fn get(&self, code: &CurrencyCode) -> Result<Option<CurrencyRate>, StorageError>;

    /// Lists every stored rate, ascending by code.
    async fn list_all(&self) -> Result<Vec<CurrencyRate>, StorageError>;

    /// Inserts the rate, or overwrites the stored value if the code exists.
    ///
    /// Rejects non-positive `usd_value` with [`StorageError::Constraint`],
    /// mirroring the database check constraint.
    async fn upsert(&self, rate: CurrencyRate) -> Result<UpsertOutcome, StorageError>;
}

/// In-memory rate store.
///
/// Keyed by the uppercase code, so iteration (and therefore `list_all`) is
/// ascending by code.
#[derive(Debug, Default)]
pub struct MemoryRateStore {
    rates: RwLock<BTreeMap<String, CurrencyRate>>,
}

impl MemoryRateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateStore for MemoryRateStore {
    async fn get(&self, code: &CurrencyCode) -> Result<Option<CurrencyRate>, StorageError> {
        let rates = self
            .rates
            .read()
            .map_err(|_| StorageError::Backend("rate store lock poisoned".to_string()))?;
        Ok(rates.get(code.as_str()).cloned())
    }

    async fn list_all(&self) -> Result<Vec<CurrencyRate>, StorageError> {
        let rates = self
            .rates
            .read()
            .map_err(|_| StorageError::Backend("rate store lock poisoned".to_string()))?;
        Ok(rates.values().cloned().collect())
    }

    async fn upsert(&self, rate: CurrencyRate) -> Result<UpsertOutcome, StorageError> {
        if rate.usd_value <= Decimal::ZERO {
            return Err(StorageError::Constraint(format!(
                "usd_value must be positive, got {}",
                rate.usd_value
            )));
        }

        let mut rates = self
            .rates
            .write()
            .map_err(|_| StorageError::Backend("rate store lock poisoned".to_string()))?;
        let outcome = if rates.contains_key(rate.code.as_str()) {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        };
        rates.insert(rate.code.as_str().to_string(), rate);
        Ok(outcome)
    }
}
