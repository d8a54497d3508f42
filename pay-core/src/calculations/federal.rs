//! Federal income tax using progressive (marginal) rate schedules.
//!
//! Income is walked through the brackets in ascending order and only the
//! slice of income inside each bracket is taxed at that bracket's rate:
//!
//! 1. Start with `tax = 0` and `remaining = taxable income`.
//! 2. For each bracket, take `min(remaining, upper - lower)` (all of
//!    `remaining` for the unbounded top bracket). Stop once that is zero.
//! 3. Add the slice × rate to `tax` and subtract the slice from `remaining`.
//!
//! Income sitting exactly on a boundary is taxed wholly at the lower rate;
//! the next rate only applies to income strictly above it.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pay_core::calculations::FederalTaxSchedule;
//! use pay_core::{FilingStatusCode, TaxBracket};
//!
//! let bracket = |lower, upper, rate| TaxBracket {
//!     tax_year: 2024,
//!     filing_status: FilingStatusCode::Single,
//!     lower_bound: lower,
//!     upper_bound: upper,
//!     marginal_rate: rate,
//! };
//!
//! let schedule = FederalTaxSchedule::new(vec![
//!     bracket(dec!(0), Some(dec!(11600)), dec!(0.10)),
//!     bracket(dec!(11600), Some(dec!(47150)), dec!(0.12)),
//!     bracket(dec!(47150), None, dec!(0.22)),
//! ])
//! .unwrap();
//!
//! // 11,600 × 10% + (37,440 − 11,600) × 12%
//! assert_eq!(schedule.calculate_tax(dec!(37440)), dec!(4260.80));
//! assert_eq!(schedule.marginal_rate(dec!(37440)), dec!(0.12));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::models::TaxBracket;

/// Reasons a set of brackets cannot form a rate schedule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BracketScheduleError {
    #[error("no tax brackets provided")]
    Empty,

    #[error("first bracket must start at 0, starts at {0}")]
    FirstBracketNotZero(Decimal),

    #[error("bracket starting at {lower} has upper bound {upper} not above it")]
    InvertedBracket { lower: Decimal, upper: Decimal },

    #[error("brackets are not contiguous: expected next bracket at {expected}, found {found}")]
    NotContiguous { expected: Decimal, found: Decimal },

    #[error("bracket starting at {0} is unbounded but is not the last bracket")]
    UnboundedBeforeLast(Decimal),

    #[error("last bracket must be unbounded, ends at {0}")]
    LastBracketBounded(Decimal),

    #[error("marginal rate must be between 0 and 1, got {0}")]
    InvalidRate(Decimal),
}

/// A validated federal rate schedule for one tax year and filing status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederalTaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl FederalTaxSchedule {
    /// Builds a schedule, sorting the brackets by lower bound and checking
    /// that they start at zero, are contiguous, have rates in [0, 1], and
    /// that only the last one is unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`BracketScheduleError`] describing the first violation found.
    pub fn new(mut brackets: Vec<TaxBracket>) -> Result<Self, BracketScheduleError> {
        brackets.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));

        let first = brackets.first().ok_or(BracketScheduleError::Empty)?;
        if first.lower_bound != Decimal::ZERO {
            return Err(BracketScheduleError::FirstBracketNotZero(first.lower_bound));
        }

        for bracket in &brackets {
            if bracket.marginal_rate < Decimal::ZERO || bracket.marginal_rate > Decimal::ONE {
                return Err(BracketScheduleError::InvalidRate(bracket.marginal_rate));
            }
        }

        for pair in brackets.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            let upper = current
                .upper_bound
                .ok_or(BracketScheduleError::UnboundedBeforeLast(current.lower_bound))?;
            if upper <= current.lower_bound {
                return Err(BracketScheduleError::InvertedBracket {
                    lower: current.lower_bound,
                    upper,
                });
            }
            if next.lower_bound != upper {
                return Err(BracketScheduleError::NotContiguous {
                    expected: upper,
                    found: next.lower_bound,
                });
            }
        }

        if let Some(upper) = brackets.last().and_then(|b| b.upper_bound) {
            return Err(BracketScheduleError::LastBracketBounded(upper));
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Federal tax on `taxable_income`, rounded to cents. Zero for income at
    /// or below zero.
    pub fn calculate_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let mut tax = Decimal::ZERO;
        let mut remaining = taxable_income;

        for bracket in &self.brackets {
            let in_bracket = match bracket.width() {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            if in_bracket <= Decimal::ZERO {
                break;
            }
            tax += in_bracket * bracket.marginal_rate;
            remaining -= in_bracket;
        }

        let tax = round_half_up(tax);
        debug!(%taxable_income, federal_tax = %tax, "walked federal brackets");
        tax
    }

    /// Rate applied to the last dollar of `taxable_income`.
    pub fn marginal_rate(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.brackets
            .iter()
            .find(|b| b.contains(taxable_income))
            .or_else(|| self.brackets.first())
            .map(|b| b.marginal_rate)
            .unwrap_or(Decimal::ZERO)
    }
}
