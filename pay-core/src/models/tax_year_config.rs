use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payroll constants for a single tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    /// Annual wage cap for the Social Security portion of FICA.
    pub ss_wage_base: Decimal,
    /// Employee Social Security rate, e.g. 0.062.
    pub ss_tax_rate: Decimal,
    /// Employee Medicare rate, e.g. 0.0145. Uncapped.
    pub medicare_tax_rate: Decimal,
}
