//! Common utility functions for pay calculations.
//!
//! This module provides shared functionality used across the calculation
//! steps, including rounding and percentage arithmetic.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pay_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2321.284)), dec!(2321.28));
/// assert_eq!(round_half_up(dec!(2321.285)), dec!(2321.29));
/// assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `percent`% of `amount`, unrounded.
///
/// ```
/// use rust_decimal_macros::dec;
/// use pay_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(60000), dec!(5)), dec!(3000));
/// ```
pub fn percent_of(
    amount: Decimal,
    percent: Decimal,
) -> Decimal {
    amount * percent / Decimal::ONE_HUNDRED
}
