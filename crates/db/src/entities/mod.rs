//! `SeaORM` entity definitions.

pub mod currency_rates;
