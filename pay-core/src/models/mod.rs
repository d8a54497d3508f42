mod cadence;
mod filing_status;
mod pay_input;
mod pay_result;
mod state_tax;
mod tax_bracket;
mod tax_year_config;

pub use cadence::PayCadence;
pub use filing_status::FilingStatusCode;
pub use pay_input::{
    DEFAULT_HOURS_PER_WEEK, InvalidInputError, MAX_AMOUNT, MAX_HOURS_PER_WEEK, PayInput,
    normalize_state_code,
};
pub use pay_result::{CadenceBreakdown, PayResult};
pub use state_tax::StateTaxInfo;
pub use tax_bracket::TaxBracket;
pub use tax_year_config::TaxYearConfig;
