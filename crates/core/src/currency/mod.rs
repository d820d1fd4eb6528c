//! Currency codes, USD-anchored rates, and conversion.
//!
//! Every stored rate is anchored to USD: `usd_value` is how many USD one
//! unit of the currency is worth. Converting between two currencies is a
//! two-hop trip through that anchor.

pub mod code;
pub mod convert;
pub mod rate;
pub mod store;

#[cfg(test)]
mod props;

pub use code::{CurrencyCode, InvalidCurrencyCode};
pub use convert::{convert_amount, round_money, Conversion, ConvertError, Converter};
pub use rate::CurrencyRate;
pub use store::{MemoryRateStore, RateStore, StorageError, UpsertOutcome};
