//! Gross pay normalization.
//!
//! Converts an amount expressed in any [`PayCadence`] into annual gross:
//!
//! | Cadence     | Annual gross |
//! |-------------|--------------|
//! | hourly      | amount × hours per week × 52 |
//! | weekly      | amount × 52 |
//! | biweekly    | amount × 26 |
//! | semimonthly | amount × 24 |
//! | monthly     | amount × 12 |
//! | annual      | amount |
//!
//! The multipliers are the same ones [`super::distributor`] divides by, so
//! converting to annual and back returns the original figure.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{InvalidInputError, MAX_AMOUNT, MAX_HOURS_PER_WEEK, PayCadence, PayInput};

/// Weeks used for every weekly and hourly conversion.
pub const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Converts `amount` paid at `cadence` into an annual figure.
///
/// `hours_per_week` is only read for hourly pay, where it is required.
///
/// # Errors
///
/// Returns [`InvalidInputError`] if `amount` is negative or above
/// [`MAX_AMOUNT`], or if the cadence is hourly and `hours_per_week` is
/// missing or outside (0, 80].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pay_core::PayCadence;
/// use pay_core::calculations::annualize;
///
/// let annual = annualize(dec!(18), PayCadence::Hourly, Some(dec!(40))).unwrap();
/// assert_eq!(annual, dec!(37440));
///
/// let annual = annualize(dec!(5000), PayCadence::Monthly, None).unwrap();
/// assert_eq!(annual, dec!(60000));
/// ```
pub fn annualize(
    amount: Decimal,
    cadence: PayCadence,
    hours_per_week: Option<Decimal>,
) -> Result<Decimal, InvalidInputError> {
    if amount < Decimal::ZERO {
        return Err(InvalidInputError::NegativeAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(InvalidInputError::AmountTooLarge(amount));
    }

    let annual = match cadence.periods_per_year() {
        Some(periods) => amount.checked_mul(periods),
        None => {
            let hours = hours_per_week.ok_or(InvalidInputError::MissingHoursPerWeek)?;
            if hours <= Decimal::ZERO || hours > MAX_HOURS_PER_WEEK {
                return Err(InvalidInputError::InvalidHoursPerWeek(hours));
            }
            amount.checked_mul(hours * WEEKS_PER_YEAR)
        }
    }
    .ok_or(InvalidInputError::AmountTooLarge(amount))?;

    debug!(%amount, %cadence, %annual, "annualized gross pay");
    Ok(annual)
}

/// Validates `input` and returns its annual gross.
///
/// # Errors
///
/// Returns [`InvalidInputError`] for any input [`PayInput::validate`] rejects.
pub fn normalize(input: &PayInput) -> Result<Decimal, InvalidInputError> {
    input.validate()?;
    annualize(input.amount, input.cadence, input.hours_per_week)
}
