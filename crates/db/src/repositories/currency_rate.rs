//! PostgreSQL implementation of the core rate store.

use async_trait::async_trait;
use chrono::Utc;
use florin_core::currency::{CurrencyCode, CurrencyRate, RateStore, StorageError, UpsertOutcome};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use tracing::debug;

use crate::entities::currency_rates;

/// Rate store backed by the currency_rates table.
#[derive(Debug, Clone)]
pub struct CurrencyRateRepository {
    db: DatabaseConnection,
}

impl CurrencyRateRepository {
    /// Creates a repository over the given connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn storage_error(err: DbErr) -> StorageError {
    StorageError::Backend(err.to_string())
}

fn model_to_rate(model: currency_rates::Model) -> Result<CurrencyRate, StorageError> {
    let code = CurrencyCode::new(&model.code)
        .map_err(|e| StorageError::Backend(format!("stored code is invalid: {e}")))?;
    Ok(CurrencyRate {
        code,
        usd_value: model.usd_value,
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

#[async_trait]
impl RateStore for CurrencyRateRepository {
    async fn get(&self, code: &CurrencyCode) -> Result<Option<CurrencyRate>, StorageError> {
        let model = currency_rates::Entity::find_by_id(code.as_str())
            .one(&self.db)
            .await
            .map_err(storage_error)?;
        model.map(model_to_rate).transpose()
    }

    async fn list_all(&self) -> Result<Vec<CurrencyRate>, StorageError> {
        let models = currency_rates::Entity::find()
            .order_by_asc(currency_rates::Column::Code)
            .all(&self.db)
            .await
            .map_err(storage_error)?;
        models.into_iter().map(model_to_rate).collect()
    }

    async fn upsert(&self, rate: CurrencyRate) -> Result<UpsertOutcome, StorageError> {
        if rate.usd_value <= Decimal::ZERO {
            return Err(StorageError::Constraint(format!(
                "usd_value must be positive, got {}",
                rate.usd_value
            )));
        }

        // Find-then-write; sync is the only writer, so there is no upsert
        // race to guard against.
        let existing = currency_rates::Entity::find_by_id(rate.code.as_str())
            .one(&self.db)
            .await
            .map_err(storage_error)?;

        if let Some(existing) = existing {
            let mut active: currency_rates::ActiveModel = existing.into();
            active.usd_value = Set(rate.usd_value);
            active.updated_at = Set(rate.updated_at.into());
            active.update(&self.db).await.map_err(storage_error)?;
            debug!(code = %rate.code, usd_value = %rate.usd_value, "Updated currency rate");
            Ok(UpsertOutcome::Updated)
        } else {
            let active = currency_rates::ActiveModel {
                code: Set(rate.code.as_str().to_string()),
                usd_value: Set(rate.usd_value),
                updated_at: Set(rate.updated_at.into()),
            };
            active.insert(&self.db).await.map_err(storage_error)?;
            debug!(code = %rate.code, usd_value = %rate.usd_value, "Inserted currency rate");
            Ok(UpsertOutcome::Inserted)
        }
    }
}
