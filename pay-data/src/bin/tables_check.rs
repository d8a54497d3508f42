use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pay_core::TaxTableProvider;
use pay_data::{FEDERAL_BRACKETS_FILE, STATE_RATES_FILE, TAX_YEARS_FILE, TaxTableSet, builtin};
use tracing_subscriber::EnvFilter;

/// Validate a directory of tax table CSVs.
///
/// The directory must contain:
/// - tax_years.csv: tax_year, ss_wage_base, ss_tax_rate, medicare_tax_rate
/// - federal_brackets.csv: tax_year, schedule (X, Y-1, Y-2, Z), min_income,
///   max_income (empty for unlimited), rate
/// - state_rates.csv: tax_year, code, name, rate, no_income_tax
///
/// Without `--dir` the tables built into the binary are checked.
#[derive(Parser, Debug)]
#[command(name = "pay-tables-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing the three CSV files
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Also list every state with its rate
    #[arg(short, long, default_value_t = false)]
    states: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let args = Args::parse();

    let tables = match &args.dir {
        Some(dir) => {
            println!(
                "Checking {}, {} and {} in: {}",
                TAX_YEARS_FILE,
                FEDERAL_BRACKETS_FILE,
                STATE_RATES_FILE,
                dir.display()
            );
            TaxTableSet::load_dir(dir)
                .with_context(|| format!("Failed to load tax tables from: {}", dir.display()))?
        }
        None => {
            println!("Checking built-in tax tables");
            builtin::tables().context("Built-in tax tables are invalid")?
        }
    };

    println!(
        "OK: {} brackets and {} state rows across years {:?}",
        tables.bracket_count(),
        tables.state_count(),
        tables.list_tax_years()
    );

    if args.states {
        for year in tables.list_tax_years() {
            let states = tables
                .list_states(year)
                .with_context(|| format!("Failed to list states for {year}"))?;
            for state in states {
                println!("{year}  {}  {:<22} {}", state.code, state.name, state.rate);
            }
        }
    }

    Ok(())
}
