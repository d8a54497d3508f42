//! Plain-text reports printed by the commands.
//!
//! Each report is a borrowed view over calculation output with a
//! [`fmt::Display`] impl, so commands render it with `to_string()`.

use std::fmt;

use pay_core::{CadenceBreakdown, FilingStatusCode, PayResult, StateTaxInfo};

use crate::format::{format_percent, format_rate, format_usd};

fn row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: &str,
) -> fmt::Result {
    writeln!(f, "{label:<26}{value:>16}")
}

fn header(
    f: &mut fmt::Formatter<'_>,
    result: &PayResult,
    filing_status: FilingStatusCode,
) -> fmt::Result {
    writeln!(
        f,
        "Tax year {}, {}, {}",
        result.tax_year,
        result.state_code,
        filing_status.label()
    )?;
    writeln!(f)
}

fn annual_lines(
    f: &mut fmt::Formatter<'_>,
    result: &PayResult,
) -> fmt::Result {
    row(f, "Annual gross", &format_usd(result.annual_gross))?;
    row(f, "Pre-tax deduction", &format_usd(result.pretax_deduction))?;
    row(f, "Taxable income", &format_usd(result.annual_taxable))?;
    row(f, "Federal income tax", &format_usd(result.federal_tax))?;
    row(
        f,
        &format!("State income tax ({})", result.state_code),
        &format_usd(result.state_tax),
    )?;
    row(f, "Social Security", &format_usd(result.social_security_tax))?;
    row(f, "Medicare", &format_usd(result.medicare_tax))?;
    row(f, "Total tax", &format_usd(result.total_tax))?;
    row(f, "Annual net", &format_usd(result.annual_net))?;
    row(
        f,
        "Effective tax rate",
        &format_percent(result.effective_tax_rate_percent, 1),
    )?;
    row(
        f,
        "Marginal federal rate",
        &format_rate(result.marginal_federal_rate, 1),
    )
}

/// Period pay in the display cadence followed by the annual breakdown.
pub struct PayReport<'a> {
    pub result: &'a PayResult,
    pub filing_status: FilingStatusCode,
}

impl fmt::Display for PayReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        header(f, self.result, self.filing_status)?;

        let cadence = self.result.display_cadence.label();
        row(f, &format!("Gross ({cadence})"), &format_usd(self.result.period_gross))?;
        row(f, &format!("Net ({cadence})"), &format_usd(self.result.period_net))?;
        writeln!(f)?;

        annual_lines(f, self.result)
    }
}

/// Annual breakdown followed by gross and net in every cadence.
pub struct TakeHomeReport<'a> {
    pub result: &'a PayResult,
    pub filing_status: FilingStatusCode,
}

impl fmt::Display for TakeHomeReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        header(f, self.result, self.filing_status)?;
        annual_lines(f, self.result)?;
        writeln!(f)?;

        writeln!(f, "{:<14}{:>14}{:>14}", "Cadence", "Gross", "Net")?;
        let cadences = self.result.gross_by_cadence.iter().zip(self.result.net_by_cadence.iter());
        for ((cadence, gross), (_, net)) in cadences {
            writeln!(
                f,
                "{:<14}{:>14}{:>14}",
                cadence.label(),
                format_usd(gross),
                format_usd(net)
            )?;
        }
        Ok(())
    }
}

/// Gross pay in every cadence.
pub struct ConversionReport<'a>(pub &'a CadenceBreakdown);

impl fmt::Display for ConversionReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (cadence, amount) in self.0.iter() {
            row(f, cadence.label(), &format_usd(amount))?;
        }
        Ok(())
    }
}

pub struct StatesReport<'a> {
    pub tax_year: i32,
    pub states: &'a [StateTaxInfo],
}

impl fmt::Display for StatesReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "State income tax rates for {}", self.tax_year)?;
        writeln!(f)?;
        for state in self.states {
            let rate = if state.has_no_income_tax {
                "none".to_string()
            } else {
                format_rate(state.rate, 2)
            };
            writeln!(f, "{:<4}{:<22}{:>8}", state.code, state.name, rate)?;
        }
        Ok(())
    }
}
