//! Tax tables compiled into the binary.
//!
//! The CSVs under `data/` are embedded with `include_str!` so the calculator
//! works without any files on disk. `--tables-dir` style overrides load the
//! same formats through [`TaxTableSet::load_dir`].

use crate::loader::TableLoadError;
use crate::tables::TaxTableSet;

/// Tax year used when none is configured.
pub const DEFAULT_TAX_YEAR: i32 = 2024;

const TAX_YEARS_CSV: &str = include_str!("../data/tax_years.csv");
const FEDERAL_BRACKETS_CSV: &str = include_str!("../data/federal_brackets.csv");
const STATE_RATES_CSV: &str = include_str!("../data/state_rates.csv");

/// Parses the embedded tables.
///
/// # Errors
///
/// Only fails if the embedded data is malformed, which the crate's tests
/// rule out.
pub fn tables() -> Result<TaxTableSet, TableLoadError> {
    TaxTableSet::from_readers(
        TAX_YEARS_CSV.as_bytes(),
        FEDERAL_BRACKETS_CSV.as_bytes(),
        STATE_RATES_CSV.as_bytes(),
    )
}
