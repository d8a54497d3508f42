use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pay_core::{FilingStatusCode, InvalidInputError, PayCadence};
use rust_decimal::Decimal;

use crate::utils::parse_decimal;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Take-home pay calculator.
///
/// Computes federal, state and payroll taxes for U.S. wages and shows gross
/// and net pay in any pay cadence.
#[derive(Debug, Parser)]
#[command(name = "paycalc", version, about, long_about = None)]
pub struct Cli {
    /// Load tax_years.csv, federal_brackets.csv and state_rates.csv from this
    /// directory instead of the built-in tables.
    #[arg(long, global = true)]
    pub tables_dir: Option<PathBuf>,

    /// TOML file with defaults for tax_year, state, filing_status,
    /// hours_per_week and log_level.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Gross pay in any cadence to net pay in the same (or --show) cadence.
    Pay(PayArgs),

    /// Annual salary to net pay per month, paycheck and year.
    TakeHome(TakeHomeArgs),

    /// Gross pay in one cadence to every other cadence. No taxes.
    Convert(ConvertArgs),

    /// List state income tax rates for a tax year.
    States(StatesArgs),
}

/// Options shared by the commands that compute taxes.
#[derive(Debug, Clone, Default, Args)]
pub struct TaxArgs {
    /// Two-letter state code (case-insensitive).
    #[arg(long)]
    pub state: Option<String>,

    /// Pre-tax (401k-style) deduction as a percent of gross, 0-100.
    #[arg(long, value_parser = parse_amount)]
    pub deduction: Option<Decimal>,

    /// Filing status: S, MFJ, MFS, HOH or QSS.
    #[arg(long, value_parser = parse_filing_status)]
    pub filing_status: Option<FilingStatusCode>,

    /// Tax year whose tables to use.
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Debug, Args)]
pub struct PayArgs {
    /// Gross amount per period, e.g. 18 or "5,000".
    #[arg(long, value_parser = parse_amount)]
    pub amount: Decimal,

    /// Cadence of --amount: hourly, weekly, biweekly, semimonthly, monthly or annual.
    #[arg(long, value_parser = parse_cadence, default_value = "annual")]
    pub cadence: PayCadence,

    /// Hours worked per week, 1-80. Required for hourly pay.
    #[arg(long, value_parser = parse_hours)]
    pub hours: Option<Decimal>,

    /// Cadence to report period pay in. Defaults to --cadence.
    #[arg(long, value_parser = parse_cadence)]
    pub show: Option<PayCadence>,

    #[command(flatten)]
    pub tax: TaxArgs,
}

#[derive(Debug, Args)]
pub struct TakeHomeArgs {
    /// Annual gross salary.
    #[arg(long, value_parser = parse_amount)]
    pub salary: Decimal,

    /// Hours worked per week, used for the hourly figure. Defaults to 40.
    #[arg(long, value_parser = parse_hours)]
    pub hours: Option<Decimal>,

    #[command(flatten)]
    pub tax: TaxArgs,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[arg(long, value_parser = parse_amount)]
    pub amount: Decimal,

    #[arg(long, value_parser = parse_cadence, default_value = "annual")]
    pub cadence: PayCadence,

    /// Hours worked per week, 1-80. Required for hourly pay.
    #[arg(long, value_parser = parse_hours)]
    pub hours: Option<Decimal>,
}

#[derive(Debug, Args)]
pub struct StatesArgs {
    #[arg(long)]
    pub year: Option<i32>,
}

// ─── value parsers ───────────────────────────────────────────────────────────

fn parse_amount(s: &str) -> Result<Decimal, String> {
    parse_decimal(s).map_err(|e| e.to_string())
}

fn parse_hours(s: &str) -> Result<Decimal, String> {
    let hours = parse_amount(s)?;
    if hours < Decimal::ONE || hours > Decimal::from(80) {
        return Err(format!("hours per week must be between 1 and 80, got {hours}"));
    }
    Ok(hours)
}

fn parse_cadence(s: &str) -> Result<PayCadence, String> {
    s.parse().map_err(|e: InvalidInputError| e.to_string())
}

fn parse_filing_status(s: &str) -> Result<FilingStatusCode, String> {
    FilingStatusCode::parse(s)
        .ok_or_else(|| InvalidInputError::UnknownFilingStatus(s.to_string()).to_string())
}
