use rust_decimal::prelude::*;

/// Monetary values are reported with 2 decimal places, ties away from zero.
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a currency amount to 2 decimal places.
///
/// Intermediate markup/VAT math stays unrounded; callers apply this only at
/// the point a monetary result is produced.
#[inline]
pub fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}
