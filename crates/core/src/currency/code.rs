//! Currency code type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A currency code is rejected when it is not exactly three ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid currency code: {0}")]
pub struct InvalidCurrencyCode(pub String);

/// ISO 4217-style currency code: exactly three ASCII letters, held uppercase.
///
/// Feed payloads and user input arrive in mixed case; construction normalizes
/// so `"eur"`, `"Eur"` and `"EUR"` compare equal and map to the same store key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalizes a currency code.
    ///
    /// # Errors
    ///
    /// Returns an error unless the trimmed input is exactly three ASCII
    /// letters.
    pub fn new(code: &str) -> Result<Self, InvalidCurrencyCode> {
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InvalidCurrencyCode(code.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// The USD reference code.
    #[must_use]
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    /// Returns the code as an uppercase string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = InvalidCurrencyCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = InvalidCurrencyCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercases_input() {
        let code = CurrencyCode::new("eur").expect("valid code");
        assert_eq!(code.as_str(), "EUR");

        let mixed = CurrencyCode::new("jPy").expect("valid code");
        assert_eq!(mixed.as_str(), "JPY");
    }

    #[test]
    fn test_trims_whitespace() {
        let code = CurrencyCode::new(" gbp ").expect("valid code");
        assert_eq!(code.as_str(), "GBP");
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(CurrencyCode::new("EU").is_err());
        assert!(CurrencyCode::new("EURO").is_err());
        assert!(CurrencyCode::new("").is_err());
    }

    #[test]
    fn test_rejects_non_letters() {
        assert!(CurrencyCode::new("EU1").is_err());
        assert!(CurrencyCode::new("E-R").is_err());
        assert!(CurrencyCode::new("日本円").is_err());
    }

    #[test]
    fn test_normalized_codes_compare_equal() {
        let a = CurrencyCode::new("usd").expect("valid code");
        let b = CurrencyCode::usd();
        assert_eq!(a, b);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let code: CurrencyCode = serde_json::from_str("\"eur\"").expect("valid code");
        assert_eq!(code.as_str(), "EUR");
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let result: Result<CurrencyCode, _> = serde_json::from_str("\"not-a-code\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_error_display_carries_input() {
        let err = CurrencyCode::new("EURO").unwrap_err();
        assert_eq!(err.to_string(), "invalid currency code: EURO");
    }
}
