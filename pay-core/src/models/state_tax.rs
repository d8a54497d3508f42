use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat income-tax treatment for one state (or DC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxInfo {
    pub tax_year: i32,
    /// Two-letter uppercase postal code.
    pub code: String,
    pub name: String,
    /// Flat rate applied to taxable income; zero when the state has no
    /// income tax.
    pub rate: Decimal,
    pub has_no_income_tax: bool,
}

impl StateTaxInfo {
    /// Rate actually charged, honouring the no-income-tax flag.
    pub fn effective_rate(&self) -> Decimal {
        if self.has_no_income_tax {
            Decimal::ZERO
        } else {
            self.rate
        }
    }
}
