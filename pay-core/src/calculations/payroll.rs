//! FICA payroll taxes: Social Security (capped at the wage base) and
//! Medicare (uncapped, no additional-Medicare surtax).
//!
//! Both are computed on gross wages, before any pre-tax deduction. A
//! 401(k)-style deferral lowers income-tax wages but not FICA wages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::TaxYearConfig;
use crate::calculations::common::round_half_up;

/// Employee share of FICA for one year of wages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTaxes {
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
}

impl PayrollTaxes {
    pub fn total(&self) -> Decimal {
        self.social_security_tax + self.medicare_tax
    }
}

/// Computes FICA from a year's payroll constants.
#[derive(Debug, Clone)]
pub struct PayrollTaxCalculator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> PayrollTaxCalculator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Social Security and Medicare on `annual_gross`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use pay_core::TaxYearConfig;
    /// use pay_core::calculations::PayrollTaxCalculator;
    ///
    /// let config = TaxYearConfig {
    ///     tax_year: 2024,
    ///     ss_wage_base: dec!(168600),
    ///     ss_tax_rate: dec!(0.062),
    ///     medicare_tax_rate: dec!(0.0145),
    /// };
    ///
    /// let taxes = PayrollTaxCalculator::new(&config).calculate(dec!(37440));
    /// assert_eq!(taxes.social_security_tax, dec!(2321.28));
    /// assert_eq!(taxes.medicare_tax, dec!(542.88));
    /// ```
    pub fn calculate(
        &self,
        annual_gross: Decimal,
    ) -> PayrollTaxes {
        let taxes = PayrollTaxes {
            social_security_tax: self.social_security_tax(annual_gross),
            medicare_tax: self.medicare_tax(annual_gross),
        };
        debug!(
            %annual_gross,
            social_security_tax = %taxes.social_security_tax,
            medicare_tax = %taxes.medicare_tax,
            "computed payroll taxes"
        );
        taxes
    }

    fn social_security_tax(
        &self,
        annual_gross: Decimal,
    ) -> Decimal {
        if annual_gross <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        if annual_gross > self.config.ss_wage_base {
            warn!(
                %annual_gross,
                ss_wage_base = %self.config.ss_wage_base,
                "Gross exceeds Social Security wage base; excess is not taxed"
            );
        }

        let wages = annual_gross.min(self.config.ss_wage_base);
        round_half_up(wages * self.config.ss_tax_rate)
    }

    fn medicare_tax(
        &self,
        annual_gross: Decimal,
    ) -> Decimal {
        if annual_gross <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        round_half_up(annual_gross * self.config.medicare_tax_rate)
    }
}
