//! Currency rates migration.
//!
//! Creates the currency_rates table, one USD-anchored rate per currency,
//! and seeds the USD reference row.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(CURRENCY_RATES_SQL).await?;
        db.execute_unprepared(SEED_USD_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS currency_rates CASCADE;")
            .await?;
        Ok(())
    }
}

const CURRENCY_RATES_SQL: &str = r"
-- One row per currency: how many USD one unit of it is worth
CREATE TABLE currency_rates (
    code CHAR(3) PRIMARY KEY,
    usd_value NUMERIC(19,10) NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_rate_code CHECK (code ~ '^[A-Z]{3}$'),
    CONSTRAINT chk_rate_positive CHECK (usd_value > 0)
);
";

const SEED_USD_SQL: &str = r"
-- Seed the USD anchor; sync never overwrites it
INSERT INTO currency_rates (code, usd_value) VALUES ('USD', 1);
";
