pub mod builtin;
mod loader;
mod tables;

pub use loader::{
    FederalBracketLoader, FederalBracketRecord, StateRateLoader, StateRateRecord, TableLoadError,
    TaxYearLoader, TaxYearRecord,
};
pub use tables::{FEDERAL_BRACKETS_FILE, STATE_RATES_FILE, TAX_YEARS_FILE, TaxTableSet};
