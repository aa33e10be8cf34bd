//! Money calculation utilities using rust_decimal for precision
//!
//! Models and storage keep rupee amounts as `f64`; every calculation goes
//! through `Decimal` here and is rounded to 2 decimal places on the way out.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: f64 = 0.01;

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via `validation::validate_money()` at
/// the boundary. If NaN/Infinity somehow reaches here, logs an error and
/// returns ZERO to avoid silent corruption in financial calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Round an f64 amount to currency precision (2dp, midpoint away from zero).
#[inline]
pub fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// `base * pct / 100`, rounded to currency precision.
pub fn percent_of(base: f64, pct: f64) -> f64 {
    to_f64(to_decimal(base) * to_decimal(pct) / Decimal::ONE_HUNDRED)
}

/// Whether two amounts agree within currency tolerance.
pub fn amounts_equal(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() <= to_decimal(MONEY_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_is_exact_at_currency_precision() {
        assert_eq!(percent_of(500.0, 20.0), 100.0);
        assert_eq!(percent_of(99.99, 10.0), 10.0);
        assert_eq!(percent_of(0.0, 50.0), 0.0);
    }

    #[test]
    fn round2_uses_midpoint_away_from_zero() {
        assert_eq!(round2(10.005), 10.01);
        assert_eq!(round2(10.004), 10.0);
    }

    #[test]
    fn amounts_equal_tolerates_a_paisa() {
        assert!(amounts_equal(100.0, 100.009));
        assert!(!amounts_equal(100.0, 100.02));
    }
}
