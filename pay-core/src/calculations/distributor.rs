//! Net pay distribution: annual figures back to a per-period cadence, plus
//! the effective tax rate.
//!
//! Divisors mirror [`super::normalizer`] exactly (52/26/24/12/1, and
//! hours × 52 for hourly), so `annualize(distribute(x, c), c) == x` up to
//! decimal precision. Results are left unrounded.

use rust_decimal::Decimal;

use crate::calculations::common::{percent_of, round_half_up};
use crate::calculations::normalizer::WEEKS_PER_YEAR;
use crate::models::{CadenceBreakdown, PayCadence};

/// Expresses `annual` in `cadence`.
///
/// `hours_per_week` is only read for the hourly cadence. A non-positive
/// value, or one so small the hourly figure cannot be represented, yields
/// an hourly figure of zero rather than an error.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pay_core::PayCadence;
/// use pay_core::calculations::distribute;
///
/// assert_eq!(distribute(dec!(60000), PayCadence::Monthly, dec!(40)), dec!(5000));
/// assert_eq!(distribute(dec!(37440), PayCadence::Hourly, dec!(40)), dec!(18));
/// ```
pub fn distribute(
    annual: Decimal,
    cadence: PayCadence,
    hours_per_week: Decimal,
) -> Decimal {
    match cadence.periods_per_year() {
        Some(periods) => annual / periods,
        None if hours_per_week <= Decimal::ZERO => Decimal::ZERO,
        None => hours_per_week
            .checked_mul(WEEKS_PER_YEAR)
            .and_then(|hours_per_year| annual.checked_div(hours_per_year))
            .unwrap_or(Decimal::ZERO),
    }
}

/// Expresses `annual` in every cadence at once.
pub fn distribute_all(
    annual: Decimal,
    hours_per_week: Decimal,
) -> CadenceBreakdown {
    let at = |cadence| distribute(annual, cadence, hours_per_week);
    CadenceBreakdown {
        hourly: at(PayCadence::Hourly),
        weekly: at(PayCadence::Weekly),
        biweekly: at(PayCadence::Biweekly),
        semimonthly: at(PayCadence::Semimonthly),
        monthly: at(PayCadence::Monthly),
        annual,
    }
}

/// Pre-tax deduction taken from gross, rounded to cents.
pub fn pretax_deduction(
    annual_gross: Decimal,
    deduction_percent: Decimal,
) -> Decimal {
    round_half_up(percent_of(annual_gross, deduction_percent))
}

/// Take-home pay: gross less the pre-tax deduction and all taxes.
pub fn annual_net(
    annual_gross: Decimal,
    pretax_deduction: Decimal,
    total_tax: Decimal,
) -> Decimal {
    annual_gross - pretax_deduction - total_tax
}

/// Total tax as a percentage of gross, rounded to two places. Zero when
/// gross is zero.
pub fn effective_tax_rate_percent(
    total_tax: Decimal,
    annual_gross: Decimal,
) -> Decimal {
    if annual_gross <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_half_up(total_tax / annual_gross * Decimal::ONE_HUNDRED)
}
