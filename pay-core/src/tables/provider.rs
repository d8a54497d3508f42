use thiserror::Error;

use crate::models::{FilingStatusCode, StateTaxInfo, TaxBracket, TaxYearConfig};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("no tax tables for year {0}")]
    YearNotFound(i32),

    #[error("state '{code}' not found in {tax_year} tables")]
    StateNotFound { tax_year: i32, code: String },

    #[error("no federal brackets for {filing_status:?} in {tax_year}")]
    NoBrackets {
        tax_year: i32,
        filing_status: FilingStatusCode,
    },
}

/// Source of the constant tables a tax year is computed from.
///
/// Implementations hold immutable data and must be safe to share across
/// threads. State codes passed in are already trimmed and uppercased.
pub trait TaxTableProvider: Send + Sync {
    // Tax year config
    fn tax_year_config(
        &self,
        tax_year: i32,
    ) -> Result<TaxYearConfig, TableError>;
    fn list_tax_years(&self) -> Vec<i32>;

    // Federal brackets, ascending by lower bound
    fn federal_brackets(
        &self,
        tax_year: i32,
        filing_status: FilingStatusCode,
    ) -> Result<Vec<TaxBracket>, TableError>;

    // State rates
    fn state_info(
        &self,
        tax_year: i32,
        code: &str,
    ) -> Result<StateTaxInfo, TableError>;
    fn list_states(
        &self,
        tax_year: i32,
    ) -> Result<Vec<StateTaxInfo>, TableError>;
}
