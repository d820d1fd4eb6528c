//! Property-based tests for currency operations.
//!
//! - Money rounding correctness (banker's rounding at 2 decimal places)
//! - Two-hop conversion formula invariants
//! - Currency code normalization

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::code::CurrencyCode;
use super::convert::{convert_amount, round_money};

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive USD values (0.000001 to 10,000.000000).
fn positive_usd_value() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000_000i64).prop_map(|v| Decimal::new(v, 6))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Conversion results always carry at most 2 decimal places.
    #[test]
    fn prop_convert_rounds_to_2_decimals(
        amount in positive_amount(),
        from_value in positive_usd_value(),
        to_value in positive_usd_value(),
    ) {
        let result = convert_amount(amount, from_value, to_value);
        let scaled = result * Decimal::from(100);
        prop_assert_eq!(
            scaled,
            scaled.round(),
            "Result {} should have at most 2 decimal places",
            result
        );
    }

    /// Conversion is deterministic.
    #[test]
    fn prop_convert_is_deterministic(
        amount in positive_amount(),
        from_value in positive_usd_value(),
        to_value in positive_usd_value(),
    ) {
        let result1 = convert_amount(amount, from_value, to_value);
        let result2 = convert_amount(amount, from_value, to_value);
        prop_assert_eq!(result1, result2, "Conversion should be deterministic");
    }

    /// Converting a currency to itself returns the amount rounded to 2
    /// decimal places, whatever its USD value.
    #[test]
    fn prop_same_currency_preserves_amount(
        amount in positive_amount(),
        usd_value in positive_usd_value(),
    ) {
        let result = convert_amount(amount, usd_value, usd_value);
        prop_assert_eq!(result, round_money(amount), "Same currency should preserve amount");
    }

    /// Positive inputs never produce a negative result (tiny ratios may
    /// round down to exactly zero).
    #[test]
    fn prop_positive_inputs_non_negative_output(
        amount in positive_amount(),
        from_value in positive_usd_value(),
        to_value in positive_usd_value(),
    ) {
        let result = convert_amount(amount, from_value, to_value);
        prop_assert!(result >= Decimal::ZERO, "Result should be non-negative");
    }

    /// Rounding an already-rounded value changes nothing.
    #[test]
    fn prop_round_money_idempotent(amount in positive_amount()) {
        let once = round_money(amount);
        prop_assert_eq!(round_money(once), once, "Rounding should be idempotent");
    }

    /// Any three ASCII letters form a valid code, normalized to uppercase.
    #[test]
    fn prop_three_letters_parse(raw in "[a-zA-Z]{3}") {
        let code = CurrencyCode::new(&raw).expect("three letters should parse");
        prop_assert_eq!(code.as_str(), raw.to_ascii_uppercase());
    }

    /// Any other length is rejected.
    #[test]
    fn prop_wrong_length_rejected(raw in "[a-zA-Z]{0,2}|[a-zA-Z]{4,8}") {
        prop_assert!(CurrencyCode::new(&raw).is_err());
    }
}

#[cfg(test)]
mod unit_tests {
    use rust_decimal_macros::dec;

    use super::*;

    /// A currency worth twice the target buys twice the units.
    #[test]
    fn test_formula_asymmetry() {
        assert_eq!(convert_amount(dec!(100), dec!(2), dec!(1)), dec!(200));
        assert_eq!(convert_amount(dec!(100), dec!(1), dec!(2)), dec!(50));
    }

    /// Tiny ratios round down to zero, not below.
    #[test]
    fn test_underflow_rounds_to_zero() {
        let result = convert_amount(dec!(0.01), dec!(0.0001), dec!(1000));
        assert_eq!(result, Decimal::ZERO);
    }
}
