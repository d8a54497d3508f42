//! The pay computation engine.
//!
//! [`PayCalculator`] reads one tax year's tables from a [`TaxTableProvider`]
//! and runs the calculation steps in order:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Validate the input (nothing is clamped) |
//! | 2    | Annual gross from amount and cadence |
//! | 3    | Pre-tax deduction = gross × percent / 100 |
//! | 4    | Taxable income = gross − pre-tax deduction |
//! | 5    | Federal tax: bracket walk over taxable income |
//! | 6    | State tax: flat rate × taxable income |
//! | 7    | Social Security: min(gross, wage base) × rate |
//! | 8    | Medicare: gross × rate |
//! | 9    | Total tax = lines 5 through 8 |
//! | 10   | Annual net = gross − deduction − total tax (never negative) |
//! | 11   | Effective rate = total tax / gross × 100 |
//! | 12   | Gross and net in the display cadence |
//!
//! An unknown state code is an error, never a silent 0% rate.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::converter::SalaryConverter;
use crate::calculations::distributor::{
    annual_net, distribute, distribute_all, effective_tax_rate_percent, pretax_deduction,
};
use crate::calculations::federal::{BracketScheduleError, FederalTaxSchedule};
use crate::calculations::normalizer::normalize;
use crate::calculations::payroll::PayrollTaxCalculator;
use crate::calculations::state::state_income_tax;
use crate::models::{
    CadenceBreakdown, FilingStatusCode, InvalidInputError, PayCadence, PayInput, PayResult,
    StateTaxInfo, normalize_state_code,
};
use crate::tables::{TableError, TaxTableProvider};

/// Errors returned by [`PayCalculator`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error("unknown state code '{0}'")]
    UnknownState(String),

    #[error("tax tables: {0}")]
    Table(#[from] TableError),

    #[error("invalid federal schedule for {filing_status:?} in {tax_year}: {source}")]
    Schedule {
        tax_year: i32,
        filing_status: FilingStatusCode,
        #[source]
        source: BracketScheduleError,
    },

    #[error("pre-tax deduction and taxes exceed gross pay by {shortfall}; lower the deduction")]
    PayShortfall { shortfall: Decimal },
}

/// Pay calculator bound to a set of tax tables.
pub struct PayCalculator<'a, P: TaxTableProvider + ?Sized> {
    tables: &'a P,
}

impl<'a, P: TaxTableProvider + ?Sized> PayCalculator<'a, P> {
    pub fn new(tables: &'a P) -> Self {
        Self { tables }
    }

    /// Runs the full calculation and reports period figures in the input's
    /// own cadence.
    ///
    /// # Errors
    ///
    /// See [`PayCalculator::calculate_as`].
    pub fn calculate(
        &self,
        input: &PayInput,
    ) -> Result<PayResult, PayError> {
        self.calculate_as(input, input.cadence)
    }

    /// Runs the full calculation and reports period figures in `display`.
    ///
    /// # Errors
    ///
    /// Returns [`PayError`] if:
    /// - the input fails validation
    /// - the state code is not in the year's tables
    /// - the year, or brackets for the filing status, are missing
    /// - the year's brackets do not form a valid schedule
    /// - the pre-tax deduction plus taxes would leave a negative net
    pub fn calculate_as(
        &self,
        input: &PayInput,
        display: PayCadence,
    ) -> Result<PayResult, PayError> {
        let annual_gross = normalize(input)?;

        let state = self.state(input.tax_year, &input.state_code)?;
        let config = self.tables.tax_year_config(input.tax_year)?;
        let schedule = self.federal_schedule(input.tax_year, input.filing_status)?;

        if annual_gross.is_zero() {
            warn!(
                amount = %input.amount,
                cadence = %input.cadence,
                "Gross pay is zero; all taxes will be zero"
            );
        }

        let pretax_deduction = pretax_deduction(annual_gross, input.deduction_percent());
        let annual_taxable = (annual_gross - pretax_deduction).max(Decimal::ZERO);

        let federal_tax = schedule.calculate_tax(annual_taxable);
        let state_tax = state_income_tax(&state, annual_taxable);
        let payroll = PayrollTaxCalculator::new(&config).calculate(annual_gross);

        let total_tax = federal_tax + state_tax + payroll.total();
        let annual_net = annual_net(annual_gross, pretax_deduction, total_tax);
        if annual_net < Decimal::ZERO {
            warn!(
                %annual_gross,
                %pretax_deduction,
                %total_tax,
                "Deduction and taxes exceed gross pay"
            );
            return Err(PayError::PayShortfall {
                shortfall: -annual_net,
            });
        }
        let effective_tax_rate_percent = effective_tax_rate_percent(total_tax, annual_gross);

        let hours = input.display_hours_per_week();
        let gross_by_cadence = distribute_all(annual_gross, hours);
        let net_by_cadence = distribute_all(annual_net, hours);

        debug!(
            tax_year = input.tax_year,
            state = %state.code,
            %annual_gross,
            %total_tax,
            %annual_net,
            "pay calculation complete"
        );

        Ok(PayResult {
            tax_year: input.tax_year,
            state_code: state.code,
            annual_gross,
            pretax_deduction,
            annual_taxable,
            federal_tax,
            state_tax,
            social_security_tax: payroll.social_security_tax,
            medicare_tax: payroll.medicare_tax,
            total_tax,
            annual_net,
            effective_tax_rate_percent,
            marginal_federal_rate: schedule.marginal_rate(annual_taxable),
            display_cadence: display,
            period_gross: distribute(annual_gross, display, hours),
            period_net: distribute(annual_net, display, hours),
            gross_by_cadence,
            net_by_cadence,
        })
    }

    /// Gross-only conversion for the salary converter.
    ///
    /// # Errors
    ///
    /// Returns [`PayError::InvalidInput`] under the same rules as
    /// [`SalaryConverter::convert`].
    pub fn convert_salary(
        &self,
        amount: Decimal,
        cadence: PayCadence,
        hours_per_week: Option<Decimal>,
    ) -> Result<CadenceBreakdown, PayError> {
        Ok(SalaryConverter.convert(amount, cadence, hours_per_week)?)
    }

    /// Looks up a state, normalizing the code first.
    ///
    /// # Errors
    ///
    /// Returns [`PayError::UnknownState`] when the code is not in the year's
    /// table, or [`PayError::Table`] when the year itself is missing.
    pub fn state(
        &self,
        tax_year: i32,
        code: &str,
    ) -> Result<StateTaxInfo, PayError> {
        let code = normalize_state_code(code);
        self.tables
            .state_info(tax_year, &code)
            .map_err(|e| match e {
                TableError::StateNotFound { code, .. } => PayError::UnknownState(code),
                other => PayError::Table(other),
            })
    }

    /// Builds the validated federal schedule for a filing status.
    ///
    /// # Errors
    ///
    /// Returns [`PayError::Table`] when the brackets are missing, or
    /// [`PayError::Schedule`] when they are malformed.
    pub fn federal_schedule(
        &self,
        tax_year: i32,
        filing_status: FilingStatusCode,
    ) -> Result<FederalTaxSchedule, PayError> {
        let brackets = self
            .tables
            .federal_brackets(tax_year, filing_status.bracket_status())?;

        FederalTaxSchedule::new(brackets).map_err(|source| PayError::Schedule {
            tax_year,
            filing_status,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{TaxBracket, TaxYearConfig};

    // ── stub tables ──────────────────────────────────────────────────────
    // 2024 Single and MFJ schedules with a handful of states.
    struct StubTables;

    fn bracket(
        filing_status: FilingStatusCode,
        lower: Decimal,
        upper: Option<Decimal>,
        rate: Decimal,
    ) -> TaxBracket {
        TaxBracket {
            tax_year: 2024,
            filing_status,
            lower_bound: lower,
            upper_bound: upper,
            marginal_rate: rate,
        }
    }

    fn state(
        code: &str,
        rate: Decimal,
    ) -> StateTaxInfo {
        StateTaxInfo {
            tax_year: 2024,
            code: code.to_string(),
            name: code.to_string(),
            rate,
            has_no_income_tax: rate.is_zero(),
        }
    }

    impl TaxTableProvider for StubTables {
        fn tax_year_config(
            &self,
            tax_year: i32,
        ) -> Result<TaxYearConfig, TableError> {
            if tax_year != 2024 {
                return Err(TableError::YearNotFound(tax_year));
            }
            Ok(TaxYearConfig {
                tax_year,
                ss_wage_base: dec!(168600),
                ss_tax_rate: dec!(0.062),
                medicare_tax_rate: dec!(0.0145),
            })
        }

        fn list_tax_years(&self) -> Vec<i32> {
            vec![2024]
        }

        fn federal_brackets(
            &self,
            tax_year: i32,
            filing_status: FilingStatusCode,
        ) -> Result<Vec<TaxBracket>, TableError> {
            let bounds: Vec<(Decimal, Option<Decimal>, Decimal)> = match filing_status {
                FilingStatusCode::Single => vec![
                    (dec!(0), Some(dec!(11600)), dec!(0.10)),
                    (dec!(11600), Some(dec!(47150)), dec!(0.12)),
                    (dec!(47150), Some(dec!(100525)), dec!(0.22)),
                    (dec!(100525), Some(dec!(191950)), dec!(0.24)),
                    (dec!(191950), Some(dec!(243725)), dec!(0.32)),
                    (dec!(243725), Some(dec!(609350)), dec!(0.35)),
                    (dec!(609350), None, dec!(0.37)),
                ],
                FilingStatusCode::MarriedFilingJointly => vec![
                    (dec!(0), Some(dec!(23200)), dec!(0.10)),
                    (dec!(23200), Some(dec!(94300)), dec!(0.12)),
                    (dec!(94300), Some(dec!(201050)), dec!(0.22)),
                    (dec!(201050), None, dec!(0.24)),
                ],
                _ => {
                    return Err(TableError::NoBrackets {
                        tax_year,
                        filing_status,
                    });
                }
            };
            Ok(bounds
                .into_iter()
                .map(|(lower, upper, rate)| bracket(filing_status, lower, upper, rate))
                .collect())
        }

        fn state_info(
            &self,
            tax_year: i32,
            code: &str,
        ) -> Result<StateTaxInfo, TableError> {
            self.list_states(tax_year)?
                .into_iter()
                .find(|s| s.code == code)
                .ok_or_else(|| TableError::StateNotFound {
                    tax_year,
                    code: code.to_string(),
                })
        }

        fn list_states(
            &self,
            tax_year: i32,
        ) -> Result<Vec<StateTaxInfo>, TableError> {
            if tax_year != 2024 {
                return Err(TableError::YearNotFound(tax_year));
            }
            Ok(vec![
                state("CA", dec!(0.0725)),
                state("IL", dec!(0.0495)),
                state("TX", dec!(0)),
                state("WA", dec!(0)),
            ])
        }
    }

    fn hourly_tx() -> PayInput {
        PayInput::new(2024, dec!(18), PayCadence::Hourly, "TX").with_hours_per_week(dec!(40))
    }

    fn annual_ca() -> PayInput {
        PayInput::new(2024, dec!(100000), PayCadence::Annual, "CA")
    }

    // =========================================================================
    // calculate (scenario) tests
    // =========================================================================

    #[test]
    fn calculate_hourly_no_income_tax_state() {
        let calculator = PayCalculator::new(&StubTables);

        let result = calculator.calculate(&hourly_tx()).unwrap();

        assert_eq!(result.annual_gross, dec!(37440));
        assert_eq!(result.annual_taxable, dec!(37440));
        assert_eq!(result.federal_tax, dec!(4260.80));
        assert_eq!(result.state_tax, dec!(0));
        assert_eq!(result.social_security_tax, dec!(2321.28));
        assert_eq!(result.medicare_tax, dec!(542.88));
        assert_eq!(result.total_tax, dec!(7124.96));
        assert_eq!(result.annual_net, dec!(30315.04));
        assert_eq!(result.effective_tax_rate_percent, dec!(19.03));
        assert_eq!(result.marginal_federal_rate, dec!(0.12));
        assert_eq!(result.display_cadence, PayCadence::Hourly);
        assert_eq!(result.period_gross, dec!(18));
        assert_eq!(result.period_net.round_dp(2), dec!(14.57));
    }

    #[test]
    fn calculate_annual_flat_rate_state() {
        let calculator = PayCalculator::new(&StubTables);

        let result = calculator.calculate(&annual_ca()).unwrap();

        assert_eq!(result.state_tax, dec!(7250.00));
        assert_eq!(result.federal_tax, dec!(17053.00));
        assert_eq!(result.social_security_tax, dec!(6200.00));
        assert_eq!(result.medicare_tax, dec!(1450.00));
        assert_eq!(result.total_tax, dec!(31953.00));
        assert_eq!(result.annual_net, dec!(68047.00));
        assert_eq!(result.effective_tax_rate_percent, dec!(31.95));
    }

    #[test]
    fn calculate_pretax_deduction_reduces_income_tax_only() {
        let calculator = PayCalculator::new(&StubTables);
        let input = annual_ca().with_pretax_deduction_percent(dec!(10));

        let result = calculator.calculate(&input).unwrap();

        assert_eq!(result.pretax_deduction, dec!(10000.00));
        assert_eq!(result.annual_taxable, dec!(90000.00));
        // 5,426 + (90,000 − 47,150) × 0.22
        assert_eq!(result.federal_tax, dec!(14853.00));
        assert_eq!(result.state_tax, dec!(6525.00));
        // FICA still on full gross
        assert_eq!(result.social_security_tax, dec!(6200.00));
        assert_eq!(result.medicare_tax, dec!(1450.00));
        assert_eq!(result.annual_net, dec!(60972.00));
    }

    #[test]
    fn calculate_net_counts_deduction_once() {
        let calculator = PayCalculator::new(&StubTables);
        let input = hourly_tx().with_pretax_deduction_percent(dec!(6));

        let result = calculator.calculate(&input).unwrap();

        assert_eq!(
            result.annual_net,
            result.annual_gross - result.total_tax - result.pretax_deduction
        );
        assert_eq!(
            result.total_tax,
            result.federal_tax + result.state_tax + result.social_security_tax + result.medicare_tax
        );
    }

    #[test]
    fn calculate_monthly_round_trips() {
        let calculator = PayCalculator::new(&StubTables);
        let input = PayInput::new(2024, dec!(5000), PayCadence::Monthly, "TX");

        let result = calculator.calculate(&input).unwrap();

        assert_eq!(result.annual_gross, dec!(60000));
        assert_eq!(result.period_gross, dec!(5000));
        assert_eq!(result.gross_by_cadence.monthly, dec!(5000));
    }

    #[test]
    fn calculate_as_reports_requested_cadence() {
        let calculator = PayCalculator::new(&StubTables);

        let result = calculator
            .calculate_as(&annual_ca(), PayCadence::Monthly)
            .unwrap();

        assert_eq!(result.display_cadence, PayCadence::Monthly);
        assert_eq!(result.period_net.round_dp(2), dec!(5670.58));
        assert_eq!(result.period_net, result.net_by_cadence.monthly);
    }

    #[test]
    fn calculate_uses_joint_brackets_for_married_filing_jointly() {
        let calculator = PayCalculator::new(&StubTables);
        let input = PayInput::new(2024, dec!(100000), PayCadence::Annual, "TX")
            .with_filing_status(FilingStatusCode::MarriedFilingJointly);

        let result = calculator.calculate(&input).unwrap();

        // 2,320 + 8,532 + (100,000 − 94,300) × 0.22
        assert_eq!(result.federal_tax, dec!(12106.00));
    }

    #[test]
    fn calculate_surviving_spouse_matches_joint() {
        let calculator = PayCalculator::new(&StubTables);
        let joint = PayInput::new(2024, dec!(100000), PayCadence::Annual, "TX")
            .with_filing_status(FilingStatusCode::MarriedFilingJointly);
        let survivor = joint
            .clone()
            .with_filing_status(FilingStatusCode::QualifyingSurvivingSpouse);

        assert_eq!(
            calculator.calculate(&survivor).unwrap().federal_tax,
            calculator.calculate(&joint).unwrap().federal_tax
        );
    }

    #[test]
    fn calculate_state_never_changes_federal_or_fica() {
        let calculator = PayCalculator::new(&StubTables);
        let ca = calculator.calculate(&annual_ca()).unwrap();
        let mut input = annual_ca();
        input.state_code = "WA".to_string();
        let wa = calculator.calculate(&input).unwrap();

        assert_eq!(ca.federal_tax, wa.federal_tax);
        assert_eq!(ca.social_security_tax, wa.social_security_tax);
        assert_eq!(ca.medicare_tax, wa.medicare_tax);
        assert_eq!(wa.state_tax, dec!(0));
    }

    #[test]
    fn calculate_caps_social_security_above_wage_base() {
        let calculator = PayCalculator::new(&StubTables);
        let input = PayInput::new(2024, dec!(200000), PayCadence::Annual, "TX");

        let result = calculator.calculate(&input).unwrap();

        assert_eq!(result.social_security_tax, dec!(10453.20));
        assert_eq!(result.medicare_tax, dec!(2900.00));
    }

    #[test]
    fn calculate_zero_income_is_all_zero() {
        let calculator = PayCalculator::new(&StubTables);
        let input = PayInput::new(2024, dec!(0), PayCadence::Annual, "CA");

        let result = calculator.calculate(&input).unwrap();

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.federal_tax, dec!(0));
        assert_eq!(result.state_tax, dec!(0));
        assert_eq!(result.social_security_tax, dec!(0));
        assert_eq!(result.medicare_tax, dec!(0));
        assert_eq!(result.annual_net, dec!(0));
        assert_eq!(result.effective_tax_rate_percent, dec!(0));
    }

    // =========================================================================
    // state lookup tests
    // =========================================================================

    #[test]
    fn calculate_normalizes_state_code() {
        let calculator = PayCalculator::new(&StubTables);
        let mut input = annual_ca();
        input.state_code = " ca".to_string();

        let result = calculator.calculate(&input).unwrap();

        assert_eq!(result.state_code, "CA");
        assert_eq!(result.state_tax, dec!(7250.00));
    }

    #[test]
    fn calculate_unknown_state_is_an_error() {
        let calculator = PayCalculator::new(&StubTables);
        let mut input = annual_ca();
        input.state_code = "zz".to_string();

        assert_eq!(
            calculator.calculate(&input),
            Err(PayError::UnknownState("ZZ".to_string()))
        );
    }

    // =========================================================================
    // error tests
    // =========================================================================

    #[test]
    fn calculate_rejects_invalid_input_before_lookup() {
        let calculator = PayCalculator::new(&StubTables);
        let input = PayInput::new(2024, dec!(-1), PayCadence::Annual, "ZZ");

        assert_eq!(
            calculator.calculate(&input),
            Err(PayError::InvalidInput(InvalidInputError::NegativeAmount(dec!(-1))))
        );
    }

    #[test]
    fn calculate_rejects_amount_beyond_range() {
        let calculator = PayCalculator::new(&StubTables);
        let amount = Decimal::MAX / dec!(10);
        let input = PayInput::new(2024, amount, PayCadence::Monthly, "CA");

        assert_eq!(
            calculator.calculate(&input),
            Err(PayError::InvalidInput(InvalidInputError::AmountTooLarge(amount)))
        );
    }

    #[test]
    fn calculate_full_deduction_is_a_shortfall() {
        let calculator = PayCalculator::new(&StubTables);
        // FICA is still owed on the full gross: 3100 + 725.
        let input = PayInput::new(2024, dec!(50000), PayCadence::Annual, "TX")
            .with_pretax_deduction_percent(dec!(100));

        assert_eq!(
            calculator.calculate(&input),
            Err(PayError::PayShortfall {
                shortfall: dec!(3825.00)
            })
        );
    }

    #[test]
    fn calculate_high_deduction_that_still_nets_is_ok() {
        let calculator = PayCalculator::new(&StubTables);
        let input = PayInput::new(2024, dec!(50000), PayCadence::Annual, "TX")
            .with_pretax_deduction_percent(dec!(90));

        let result = calculator.calculate(&input).unwrap();

        assert_eq!(result.federal_tax, dec!(500.00));
        assert_eq!(result.total_tax, dec!(4325.00));
        assert_eq!(result.annual_net, dec!(675.00));
    }

    #[test]
    fn calculate_unknown_year_is_table_error() {
        let calculator = PayCalculator::new(&StubTables);
        let input = PayInput::new(1999, dec!(50000), PayCadence::Annual, "CA");

        assert_eq!(
            calculator.calculate(&input),
            Err(PayError::Table(TableError::YearNotFound(1999)))
        );
    }

    #[test]
    fn calculate_missing_brackets_is_table_error() {
        let calculator = PayCalculator::new(&StubTables);
        let input = PayInput::new(2024, dec!(50000), PayCadence::Annual, "CA")
            .with_filing_status(FilingStatusCode::HeadOfHousehold);

        assert_eq!(
            calculator.calculate(&input),
            Err(PayError::Table(TableError::NoBrackets {
                tax_year: 2024,
                filing_status: FilingStatusCode::HeadOfHousehold,
            }))
        );
    }

    // =========================================================================
    // convert_salary tests
    // =========================================================================

    #[test]
    fn convert_salary_matches_pay_calculator_gross() {
        let calculator = PayCalculator::new(&StubTables);

        let converted = calculator
            .convert_salary(dec!(18), PayCadence::Hourly, Some(dec!(40)))
            .unwrap();
        let calculated = calculator.calculate(&hourly_tx()).unwrap();

        assert_eq!(converted, calculated.gross_by_cadence);
    }

    #[test]
    fn convert_salary_wraps_input_errors() {
        let calculator = PayCalculator::new(&StubTables);

        assert_eq!(
            calculator.convert_salary(dec!(18), PayCadence::Hourly, None),
            Err(PayError::InvalidInput(InvalidInputError::MissingHoursPerWeek))
        );
    }
}
