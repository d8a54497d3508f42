use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{FilingStatusCode, PayCadence};

/// Upper bound on hours worked per week accepted for hourly pay.
pub const MAX_HOURS_PER_WEEK: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Largest amount accepted in any cadence. Keeps annual gross (at most
/// amount × 80 hours × 52 weeks) and every tax product well inside
/// `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Hours per week assumed when an hourly figure is displayed for income
/// that was not entered hourly.
pub const DEFAULT_HOURS_PER_WEEK: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Errors raised when a pay input cannot be computed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("amount must be at most {max}, got {0}", max = MAX_AMOUNT)]
    AmountTooLarge(Decimal),

    #[error("hours per week is required for hourly pay")]
    MissingHoursPerWeek,

    #[error("hours per week must be greater than 0 and at most {max}, got {0}", max = MAX_HOURS_PER_WEEK)]
    InvalidHoursPerWeek(Decimal),

    #[error("pre-tax deduction percent must be between 0 and 100, got {0}")]
    DeductionPercentOutOfRange(Decimal),

    #[error("unrecognised pay cadence '{0}'")]
    UnknownCadence(String),

    #[error("unrecognised filing status '{0}'")]
    UnknownFilingStatus(String),
}

/// Trims and uppercases a state code for table lookup.
pub fn normalize_state_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// A single pay calculation request, as entered in one of the calculator
/// forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayInput {
    pub tax_year: i32,
    pub amount: Decimal,
    pub cadence: PayCadence,
    /// Required when `cadence` is hourly.
    pub hours_per_week: Option<Decimal>,
    pub state_code: String,
    pub filing_status: FilingStatusCode,
    /// 401(k)-style deduction as a percentage of gross, 0–100.
    pub pretax_deduction_percent: Option<Decimal>,
}

impl PayInput {
    pub fn new(
        tax_year: i32,
        amount: Decimal,
        cadence: PayCadence,
        state_code: impl Into<String>,
    ) -> Self {
        Self {
            tax_year,
            amount,
            cadence,
            hours_per_week: None,
            state_code: state_code.into(),
            filing_status: FilingStatusCode::Single,
            pretax_deduction_percent: None,
        }
    }

    pub fn with_hours_per_week(
        mut self,
        hours: Decimal,
    ) -> Self {
        self.hours_per_week = Some(hours);
        self
    }

    pub fn with_pretax_deduction_percent(
        mut self,
        percent: Decimal,
    ) -> Self {
        self.pretax_deduction_percent = Some(percent);
        self
    }

    pub fn with_filing_status(
        mut self,
        status: FilingStatusCode,
    ) -> Self {
        self.filing_status = status;
        self
    }

    /// Checks the input against the ranges the engine accepts. Nothing is
    /// clamped: out-of-range values are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] if:
    /// - `amount` is negative or above [`MAX_AMOUNT`]
    /// - the cadence is hourly and `hours_per_week` is missing
    /// - `hours_per_week` is present but not in (0, 80]
    /// - `pretax_deduction_percent` is present but not in [0, 100]
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.amount < Decimal::ZERO {
            return Err(InvalidInputError::NegativeAmount(self.amount));
        }
        if self.amount > MAX_AMOUNT {
            return Err(InvalidInputError::AmountTooLarge(self.amount));
        }

        match (self.cadence, self.hours_per_week) {
            (PayCadence::Hourly, None) => return Err(InvalidInputError::MissingHoursPerWeek),
            (_, Some(hours)) if hours <= Decimal::ZERO || hours > MAX_HOURS_PER_WEEK => {
                return Err(InvalidInputError::InvalidHoursPerWeek(hours));
            }
            _ => {}
        }

        if let Some(percent) = self.pretax_deduction_percent {
            if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
                return Err(InvalidInputError::DeductionPercentOutOfRange(percent));
            }
        }

        Ok(())
    }

    /// Deduction percent, treating an absent value as zero.
    pub fn deduction_percent(&self) -> Decimal {
        self.pretax_deduction_percent.unwrap_or(Decimal::ZERO)
    }

    /// Hours used to express results per hour.
    pub fn display_hours_per_week(&self) -> Decimal {
        self.hours_per_week.unwrap_or(DEFAULT_HOURS_PER_WEEK)
    }
}
