//! Amount handling.
//!
//! Amounts are `Decimal` values with two fraction digits in the domain and are
//! stored as an `i64` number of **minor units** (hundredths) in the database.
//! Example: `10.50` ⇄ `1050`.

use rust_decimal::Decimal;

use crate::{EngineError, ResultEngine};

/// Number of fraction digits kept for amounts.
pub const AMOUNT_SCALE: u32 = 2;

/// Validate a user supplied amount and round it to two fraction digits.
///
/// Rounding uses banker's rounding. The result must be strictly positive.
pub(crate) fn normalize_amount(amount: Decimal) -> ResultEngine<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount(
            "amount must be greater than zero".to_string(),
        ));
    }
    let mut rounded = amount.round_dp(AMOUNT_SCALE);
    if rounded <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount(
            "amount must be at least 0.01".to_string(),
        ));
    }
    rounded.rescale(AMOUNT_SCALE);
    Ok(rounded)
}

/// Convert a normalized amount to minor units for storage.
pub(crate) fn to_minor(amount: Decimal) -> ResultEngine<i64> {
    let mut scaled = amount.round_dp(AMOUNT_SCALE);
    scaled.rescale(AMOUNT_SCALE);
    i64::try_from(scaled.mantissa())
        .map_err(|_| EngineError::InvalidAmount(format!("amount {amount} is out of range")))
}

/// Convert stored minor units back to an amount.
pub(crate) fn from_minor(amount_minor: i64) -> Decimal {
    Decimal::new(amount_minor, AMOUNT_SCALE)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert!(matches!(
            normalize_amount(Decimal::ZERO),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(matches!(
            normalize_amount(dec("-5")),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn rejects_amount_rounding_to_zero() {
        assert!(normalize_amount(dec("0.001")).is_err());
    }

    #[test]
    fn rounds_to_two_digits() {
        assert_eq!(normalize_amount(dec("12.345")).unwrap().to_string(), "12.34");
        assert_eq!(normalize_amount(dec("12.355")).unwrap().to_string(), "12.36");
        assert_eq!(normalize_amount(dec("7")).unwrap().to_string(), "7.00");
    }

    #[test]
    fn minor_units_conversion() {
        assert_eq!(to_minor(dec("10.50")).unwrap(), 1050);
        assert_eq!(to_minor(dec("3")).unwrap(), 300);
        assert_eq!(from_minor(1299).to_string(), "12.99");
    }
}
