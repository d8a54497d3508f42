use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayCadence;

/// One income figure expressed in every supported cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadenceBreakdown {
    pub hourly: Decimal,
    pub weekly: Decimal,
    pub biweekly: Decimal,
    pub semimonthly: Decimal,
    pub monthly: Decimal,
    pub annual: Decimal,
}

impl CadenceBreakdown {
    pub fn get(
        &self,
        cadence: PayCadence,
    ) -> Decimal {
        match cadence {
            PayCadence::Hourly => self.hourly,
            PayCadence::Weekly => self.weekly,
            PayCadence::Biweekly => self.biweekly,
            PayCadence::Semimonthly => self.semimonthly,
            PayCadence::Monthly => self.monthly,
            PayCadence::Annual => self.annual,
        }
    }

    /// `(cadence, amount)` pairs in display order, hourly first.
    pub fn iter(&self) -> impl Iterator<Item = (PayCadence, Decimal)> + '_ {
        PayCadence::all().iter().map(|c| (*c, self.get(*c)))
    }
}

/// Result of a full pay calculation.
///
/// Tax components and the pre-tax deduction are rounded to cents. Gross,
/// taxable and net figures carry full precision so that cadence conversions
/// round-trip; format them at display time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayResult {
    pub tax_year: i32,
    pub state_code: String,

    pub annual_gross: Decimal,
    pub pretax_deduction: Decimal,
    pub annual_taxable: Decimal,

    pub federal_tax: Decimal,
    pub state_tax: Decimal,
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
    pub total_tax: Decimal,

    pub annual_net: Decimal,
    pub effective_tax_rate_percent: Decimal,
    /// Marginal federal rate on the last dollar of taxable income.
    pub marginal_federal_rate: Decimal,

    pub display_cadence: PayCadence,
    pub period_gross: Decimal,
    pub period_net: Decimal,

    pub gross_by_cadence: CadenceBreakdown,
    pub net_by_cadence: CadenceBreakdown,
}
