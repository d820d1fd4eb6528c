//! Database migration runner for Florin.
//!
//! Usage:
//!   migrator up      - Apply all pending migrations
//!   migrator down    - Roll back the last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-apply migrations

use florin_db::migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // The migrator CLI sets up its own tracing
    cli::run_cli(Migrator).await;
}
