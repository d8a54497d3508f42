//! Salary cadence conversion without tax.
//!
//! Annualizes a gross figure and spreads it across every cadence using the
//! same constants as the pay calculator, so $18/hour at 40 hours a week is
//! $37,440 a year in every tool.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::distributor::distribute_all;
use crate::calculations::normalizer::annualize;
use crate::models::{
    CadenceBreakdown, DEFAULT_HOURS_PER_WEEK, InvalidInputError, MAX_HOURS_PER_WEEK, PayCadence,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SalaryConverter;

impl SalaryConverter {
    /// Converts gross `amount` paid at `cadence` into all cadences.
    ///
    /// `hours_per_week` is required for hourly input. For other cadences it
    /// only sets the hourly figure and defaults to 40.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] for a negative amount, or for hours that
    /// are missing on hourly input or outside (0, 80] when given.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use pay_core::PayCadence;
    /// use pay_core::calculations::SalaryConverter;
    ///
    /// let breakdown = SalaryConverter
    ///     .convert(dec!(18), PayCadence::Hourly, Some(dec!(40)))
    ///     .unwrap();
    ///
    /// assert_eq!(breakdown.annual, dec!(37440));
    /// assert_eq!(breakdown.weekly, dec!(720));
    /// assert_eq!(breakdown.monthly, dec!(3120));
    /// ```
    pub fn convert(
        &self,
        amount: Decimal,
        cadence: PayCadence,
        hours_per_week: Option<Decimal>,
    ) -> Result<CadenceBreakdown, InvalidInputError> {
        if let Some(hours) = hours_per_week {
            if hours <= Decimal::ZERO || hours > MAX_HOURS_PER_WEEK {
                return Err(InvalidInputError::InvalidHoursPerWeek(hours));
            }
        }

        let annual = annualize(amount, cadence, hours_per_week)?;
        let breakdown = distribute_all(annual, hours_per_week.unwrap_or(DEFAULT_HOURS_PER_WEEK));

        debug!(%amount, %cadence, %annual, "converted salary across cadences");
        Ok(breakdown)
    }
}
