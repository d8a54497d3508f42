//! Command execution. Each command returns its report as a string so that
//! `main` only has to print it.

use std::path::Path;

use anyhow::{Context, Result, bail};
use pay_core::calculations::PayCalculator;
use pay_core::{FilingStatusCode, PayCadence, PayInput, TaxTableProvider};
use pay_data::{TaxTableSet, builtin};
use rust_decimal::Decimal;
use tracing::debug;

use crate::cli::{Cli, Command, ConvertArgs, PayArgs, StatesArgs, TakeHomeArgs, TaxArgs};
use crate::config::CliConfig;
use crate::report::{ConversionReport, PayReport, StatesReport, TakeHomeReport};

/// Tax settings after merging flags over config-file defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxSettings {
    pub tax_year: i32,
    pub state: String,
    pub filing_status: FilingStatusCode,
    pub deduction_percent: Option<Decimal>,
}

impl TaxSettings {
    pub fn resolve(
        args: &TaxArgs,
        config: &CliConfig,
    ) -> Result<Self> {
        let Some(state) = args.state.clone().or_else(|| config.state.clone()) else {
            bail!("no state given; pass --state or set `state` in the config file");
        };
        let filing_status = match args.filing_status {
            Some(status) => status,
            None => config.filing_status()?.unwrap_or_default(),
        };

        Ok(Self {
            tax_year: resolve_year(args.year, config),
            state,
            filing_status,
            deduction_percent: args.deduction,
        })
    }

    fn input(
        &self,
        amount: Decimal,
        cadence: PayCadence,
        hours_per_week: Option<Decimal>,
    ) -> PayInput {
        let mut input = PayInput::new(self.tax_year, amount, cadence, self.state.as_str())
            .with_filing_status(self.filing_status);
        if let Some(hours) = hours_per_week {
            input = input.with_hours_per_week(hours);
        }
        if let Some(percent) = self.deduction_percent {
            input = input.with_pretax_deduction_percent(percent);
        }
        input
    }
}

fn resolve_year(
    flag: Option<i32>,
    config: &CliConfig,
) -> i32 {
    flag.or(config.tax_year).unwrap_or(builtin::DEFAULT_TAX_YEAR)
}

/// Built-in tables, or the CSVs in `dir` when given.
pub fn load_tables(dir: Option<&Path>) -> Result<TaxTableSet> {
    match dir {
        Some(dir) => TaxTableSet::load_dir(dir)
            .with_context(|| format!("Failed to load tax tables from: {}", dir.display())),
        None => builtin::tables().context("Built-in tax tables are invalid"),
    }
}

pub fn run(
    cli: &Cli,
    config: &CliConfig,
) -> Result<String> {
    match &cli.command {
        Command::Pay(args) => pay(&load_tables(cli.tables_dir.as_deref())?, config, args),
        Command::TakeHome(args) => {
            take_home(&load_tables(cli.tables_dir.as_deref())?, config, args)
        }
        Command::Convert(args) => convert(config, args),
        Command::States(args) => states(&load_tables(cli.tables_dir.as_deref())?, config, args),
    }
}

pub fn pay(
    tables: &TaxTableSet,
    config: &CliConfig,
    args: &PayArgs,
) -> Result<String> {
    let settings = TaxSettings::resolve(&args.tax, config)?;
    let hours = args.hours.or(config.hours_per_week);
    let input = settings.input(args.amount, args.cadence, hours);
    debug!(?input, "running pay calculation");

    let result = PayCalculator::new(tables)
        .calculate_as(&input, args.show.unwrap_or(args.cadence))
        .context("Pay calculation failed")?;

    Ok(PayReport {
        result: &result,
        filing_status: settings.filing_status,
    }
    .to_string())
}

pub fn take_home(
    tables: &TaxTableSet,
    config: &CliConfig,
    args: &TakeHomeArgs,
) -> Result<String> {
    let settings = TaxSettings::resolve(&args.tax, config)?;
    let hours = args.hours.or(config.hours_per_week);
    let input = settings.input(args.salary, PayCadence::Annual, hours);
    debug!(?input, "running take-home calculation");

    let result = PayCalculator::new(tables)
        .calculate_as(&input, PayCadence::Monthly)
        .context("Take-home calculation failed")?;

    Ok(TakeHomeReport {
        result: &result,
        filing_status: settings.filing_status,
    }
    .to_string())
}

pub fn convert(
    config: &CliConfig,
    args: &ConvertArgs,
) -> Result<String> {
    let hours = args.hours.or(config.hours_per_week);
    let breakdown = pay_core::calculations::SalaryConverter
        .convert(args.amount, args.cadence, hours)
        .context("Salary conversion failed")?;

    Ok(ConversionReport(&breakdown).to_string())
}

pub fn states(
    tables: &TaxTableSet,
    config: &CliConfig,
    args: &StatesArgs,
) -> Result<String> {
    let tax_year = resolve_year(args.year, config);
    let states = tables
        .list_states(tax_year)
        .with_context(|| format!("No state table for {tax_year}"))?;

    Ok(StatesReport {
        tax_year,
        states: &states,
    }
    .to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn tax_args(state: Option<&str>) -> TaxArgs {
        TaxArgs {
            state: state.map(str::to_string),
            ..TaxArgs::default()
        }
    }

    #[test]
    fn flags_override_config() {
        let config = CliConfig {
            tax_year: Some(2026),
            state: Some("CA".to_string()),
            filing_status: Some("HOH".to_string()),
            ..CliConfig::default()
        };
        let args = TaxArgs {
            state: Some("tx".to_string()),
            year: Some(2024),
            ..TaxArgs::default()
        };

        let settings = TaxSettings::resolve(&args, &config).unwrap();

        assert_eq!(
            settings,
            TaxSettings {
                tax_year: 2024,
                state: "tx".to_string(),
                filing_status: FilingStatusCode::HeadOfHousehold,
                deduction_percent: None,
            }
        );
    }

    #[test]
    fn defaults_apply_without_config() {
        let settings = TaxSettings::resolve(&tax_args(Some("WA")), &CliConfig::default()).unwrap();

        assert_eq!(settings.tax_year, builtin::DEFAULT_TAX_YEAR);
        assert_eq!(settings.filing_status, FilingStatusCode::Single);
    }

    #[test]
    fn missing_state_is_an_error() {
        assert!(TaxSettings::resolve(&tax_args(None), &CliConfig::default()).is_err());
    }

    #[test]
    fn hourly_pay_report() {
        let tables = builtin::tables().unwrap();
        let args = PayArgs {
            amount: dec!(18),
            cadence: PayCadence::Hourly,
            hours: Some(dec!(40)),
            show: None,
            tax: tax_args(Some("tx")),
        };

        let report = pay(&tables, &CliConfig::default(), &args).unwrap();

        assert!(report.starts_with("Tax year 2024, TX, Single"), "{report}");
        assert!(report.contains("$14.57"), "{report}");
        assert!(report.contains("$30,315.04"), "{report}");
        assert!(report.contains("19.0%"), "{report}");
    }

    #[test]
    fn hourly_pay_uses_config_hours() {
        let tables = builtin::tables().unwrap();
        let config = CliConfig {
            hours_per_week: Some(dec!(40)),
            ..CliConfig::default()
        };
        let args = PayArgs {
            amount: dec!(18),
            cadence: PayCadence::Hourly,
            hours: None,
            show: Some(PayCadence::Annual),
            tax: tax_args(Some("tx")),
        };

        let report = pay(&tables, &config, &args).unwrap();

        assert!(report.contains("$37,440.00"), "{report}");
    }

    #[test]
    fn hourly_pay_without_hours_fails() {
        let tables = builtin::tables().unwrap();
        let args = PayArgs {
            amount: dec!(18),
            cadence: PayCadence::Hourly,
            hours: None,
            show: None,
            tax: tax_args(Some("tx")),
        };

        assert!(pay(&tables, &CliConfig::default(), &args).is_err());
    }

    #[test]
    fn take_home_shows_monthly_net() {
        let tables = builtin::tables().unwrap();
        let args = TakeHomeArgs {
            salary: dec!(100000),
            hours: None,
            tax: tax_args(Some("ca")),
        };

        let report = take_home(&tables, &CliConfig::default(), &args).unwrap();

        // 68,047 / 12
        assert!(report.contains("$5,670.58"), "{report}");
        assert!(report.contains("$31,953.00"), "{report}");
    }

    #[test]
    fn unknown_state_fails() {
        let tables = builtin::tables().unwrap();
        let args = TakeHomeArgs {
            salary: dec!(50000),
            hours: None,
            tax: tax_args(Some("ZZ")),
        };

        let err = take_home(&tables, &CliConfig::default(), &args).unwrap_err();

        assert!(format!("{err:#}").contains("unknown state code 'ZZ'"));
    }

    #[test]
    fn full_deduction_reports_shortfall() {
        let tables = builtin::tables().unwrap();
        let args = TakeHomeArgs {
            salary: dec!(50000),
            hours: None,
            tax: TaxArgs {
                deduction: Some(dec!(100)),
                ..tax_args(Some("TX"))
            },
        };

        let err = take_home(&tables, &CliConfig::default(), &args).unwrap_err();

        assert!(
            format!("{err:#}").contains("exceed gross pay by 3825.00"),
            "{err:#}"
        );
    }

    #[test]
    fn convert_monthly() {
        let args = ConvertArgs {
            amount: dec!(5000),
            cadence: PayCadence::Monthly,
            hours: None,
        };

        let report = convert(&CliConfig::default(), &args).unwrap();

        assert!(report.contains("$60,000.00"), "{report}");
        assert!(report.contains("$5,000.00"), "{report}");
    }
}
