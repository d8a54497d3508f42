use std::io::Read;
use std::path::PathBuf;

use pay_core::calculations::BracketScheduleError;
use pay_core::{FilingStatusCode, StateTaxInfo, TaxBracket, TaxYearConfig, normalize_state_code};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when loading tax table data.
#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid state record '{code}' for {tax_year}: {reason}")]
    InvalidState {
        tax_year: i32,
        code: String,
        reason: &'static str,
    },

    #[error("Invalid payroll constants for {tax_year}: {reason}")]
    InvalidTaxYear { tax_year: i32, reason: &'static str },

    #[error("Tax year {0} is referenced but has no payroll constants")]
    TaxYearNotFound(i32),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Invalid federal brackets for {filing_status:?} in {tax_year}: {source}")]
    Schedule {
        tax_year: i32,
        filing_status: FilingStatusCode,
        #[source]
        source: BracketScheduleError,
    },

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for TableLoadError {
    fn from(err: csv::Error) -> Self {
        TableLoadError::CsvParse(err.to_string())
    }
}

/// Reads every row of a headed CSV into `T`. Whitespace around values is
/// ignored.
fn parse_records<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>, TableLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: T = result?;
        records.push(record);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Federal brackets
// ---------------------------------------------------------------------------

/// Maps IRS schedule codes to filing status codes.
///
/// - Schedule X → Single (S)
/// - Schedule Y-1 → Married Filing Jointly (MFJ) and Qualifying Surviving Spouse (QSS)
/// - Schedule Y-2 → Married Filing Separately (MFS)
/// - Schedule Z → Head of Household (HOH)
fn schedule_to_filing_statuses(
    schedule: &str
) -> Result<&'static [FilingStatusCode], TableLoadError> {
    match schedule {
        "X" => Ok(&[FilingStatusCode::Single]),
        "Y-1" => Ok(&[
            FilingStatusCode::MarriedFilingJointly,
            FilingStatusCode::QualifyingSurvivingSpouse,
        ]),
        "Y-2" => Ok(&[FilingStatusCode::MarriedFilingSeparately]),
        "Z" => Ok(&[FilingStatusCode::HeadOfHousehold]),
        _ => Err(TableLoadError::InvalidSchedule(schedule.to_string())),
    }
}

/// A single record from the federal brackets CSV file.
///
/// - `tax_year`: The tax year (e.g., 2024)
/// - `schedule`: The IRS schedule code (X, Y-1, Y-2, Z)
/// - `min_income`: Lower bound of the bracket
/// - `max_income`: Upper bound of the bracket (empty for unlimited)
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FederalBracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for federal bracket data.
///
/// The CSV uses IRS schedule codes which are expanded to one bracket row per
/// filing status. Schedule Y-1 therefore yields rows for both MFJ and QSS.
pub struct FederalBracketLoader;

impl FederalBracketLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<FederalBracketRecord>, TableLoadError> {
        parse_records(reader)
    }

    /// Expand records into per-filing-status brackets.
    pub fn to_brackets(
        records: &[FederalBracketRecord]
    ) -> Result<Vec<TaxBracket>, TableLoadError> {
        let mut brackets = Vec::with_capacity(records.len());

        for record in records {
            for status in schedule_to_filing_statuses(&record.schedule)? {
                brackets.push(TaxBracket {
                    tax_year: record.tax_year,
                    filing_status: *status,
                    lower_bound: record.min_income,
                    upper_bound: record.max_income,
                    marginal_rate: record.rate,
                });
            }
        }

        Ok(brackets)
    }
}

// ---------------------------------------------------------------------------
// State rates
// ---------------------------------------------------------------------------

/// A single record from the state rates CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StateRateRecord {
    pub tax_year: i32,
    pub code: String,
    pub name: String,
    pub rate: Decimal,
    pub no_income_tax: bool,
}

pub struct StateRateLoader;

impl StateRateLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<StateRateRecord>, TableLoadError> {
        parse_records(reader)
    }

    /// Validate records and convert them to [`StateTaxInfo`].
    ///
    /// Codes are uppercased. A rate must be in [0, 1), and a state flagged
    /// as having no income tax must carry a zero rate.
    pub fn to_states(records: &[StateRateRecord]) -> Result<Vec<StateTaxInfo>, TableLoadError> {
        records
            .iter()
            .map(|record| {
                let code = normalize_state_code(&record.code);
                let invalid = |reason| TableLoadError::InvalidState {
                    tax_year: record.tax_year,
                    code: code.clone(),
                    reason,
                };

                if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(invalid("code must be two letters"));
                }
                if record.rate < Decimal::ZERO || record.rate >= Decimal::ONE {
                    return Err(invalid("rate must be at least 0 and below 1"));
                }
                if record.no_income_tax && !record.rate.is_zero() {
                    return Err(invalid("state without income tax has a non-zero rate"));
                }

                Ok(StateTaxInfo {
                    tax_year: record.tax_year,
                    code: code.clone(),
                    name: record.name.clone(),
                    rate: record.rate,
                    has_no_income_tax: record.no_income_tax,
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tax year payroll constants
// ---------------------------------------------------------------------------

/// A single record from the tax years CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxYearRecord {
    pub tax_year: i32,
    pub ss_wage_base: Decimal,
    pub ss_tax_rate: Decimal,
    pub medicare_tax_rate: Decimal,
}

pub struct TaxYearLoader;

impl TaxYearLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxYearRecord>, TableLoadError> {
        parse_records(reader)
    }

    pub fn to_configs(records: &[TaxYearRecord]) -> Result<Vec<TaxYearConfig>, TableLoadError> {
        records
            .iter()
            .map(|record| {
                let invalid = |reason| TableLoadError::InvalidTaxYear {
                    tax_year: record.tax_year,
                    reason,
                };

                if record.ss_wage_base <= Decimal::ZERO {
                    return Err(invalid("social security wage base must be positive"));
                }
                for rate in [record.ss_tax_rate, record.medicare_tax_rate] {
                    if rate < Decimal::ZERO || rate > Decimal::ONE {
                        return Err(invalid("payroll rates must be between 0 and 1"));
                    }
                }

                Ok(TaxYearConfig {
                    tax_year: record.tax_year,
                    ss_wage_base: record.ss_wage_base,
                    ss_tax_rate: record.ss_tax_rate,
                    medicare_tax_rate: record.medicare_tax_rate,
                })
            })
            .collect()
    }
}
