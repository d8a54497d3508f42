//! In-memory tax tables assembled from the three CSV sources.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use pay_core::calculations::FederalTaxSchedule;
use pay_core::{
    FilingStatusCode, StateTaxInfo, TableError, TaxBracket, TaxTableProvider, TaxYearConfig,
};
use tracing::{debug, info};

use crate::loader::{FederalBracketLoader, StateRateLoader, TableLoadError, TaxYearLoader};

pub const TAX_YEARS_FILE: &str = "tax_years.csv";
pub const FEDERAL_BRACKETS_FILE: &str = "federal_brackets.csv";
pub const STATE_RATES_FILE: &str = "state_rates.csv";

/// Immutable tax tables for one or more tax years.
///
/// Every federal schedule is validated when the set is built, so a
/// malformed bracket file fails at load time rather than mid-calculation.
#[derive(Debug, Clone, Default)]
pub struct TaxTableSet {
    years: BTreeMap<i32, TaxYearConfig>,
    brackets: HashMap<(i32, FilingStatusCode), Vec<TaxBracket>>,
    states: BTreeMap<(i32, String), StateTaxInfo>,
}

impl TaxTableSet {
    /// Builds a table set from already-converted rows.
    ///
    /// # Errors
    ///
    /// Returns [`TableLoadError`] if:
    /// - a tax year or a (year, state) pair appears twice
    /// - a bracket or state row references a year with no payroll constants
    /// - the brackets for a (year, filing status) do not form a valid schedule
    pub fn new(
        configs: Vec<TaxYearConfig>,
        brackets: Vec<TaxBracket>,
        states: Vec<StateTaxInfo>,
    ) -> Result<Self, TableLoadError> {
        let mut years = BTreeMap::new();
        for config in configs {
            let tax_year = config.tax_year;
            if years.insert(tax_year, config).is_some() {
                return Err(TableLoadError::Duplicate(format!("tax year {tax_year}")));
            }
        }

        let mut grouped: HashMap<(i32, FilingStatusCode), Vec<TaxBracket>> = HashMap::new();
        for bracket in brackets {
            if !years.contains_key(&bracket.tax_year) {
                return Err(TableLoadError::TaxYearNotFound(bracket.tax_year));
            }
            grouped
                .entry((bracket.tax_year, bracket.filing_status))
                .or_default()
                .push(bracket);
        }

        let mut validated = HashMap::with_capacity(grouped.len());
        for ((tax_year, filing_status), group) in grouped {
            let schedule =
                FederalTaxSchedule::new(group).map_err(|source| TableLoadError::Schedule {
                    tax_year,
                    filing_status,
                    source,
                })?;
            validated.insert((tax_year, filing_status), schedule.brackets().to_vec());
        }

        let mut by_code = BTreeMap::new();
        for state in states {
            if !years.contains_key(&state.tax_year) {
                return Err(TableLoadError::TaxYearNotFound(state.tax_year));
            }
            let key = (state.tax_year, state.code.clone());
            if by_code.contains_key(&key) {
                return Err(TableLoadError::Duplicate(format!(
                    "state {} in {}",
                    key.1, key.0
                )));
            }
            by_code.insert(key, state);
        }

        Ok(Self {
            years,
            brackets: validated,
            states: by_code,
        })
    }

    /// Parses and validates the three CSV sources.
    pub fn from_readers<Y: Read, B: Read, S: Read>(
        tax_years: Y,
        federal_brackets: B,
        state_rates: S,
    ) -> Result<Self, TableLoadError> {
        let configs = TaxYearLoader::to_configs(&TaxYearLoader::parse(tax_years)?)?;
        let brackets = FederalBracketLoader::to_brackets(&FederalBracketLoader::parse(
            federal_brackets,
        )?)?;
        let states = StateRateLoader::to_states(&StateRateLoader::parse(state_rates)?)?;

        debug!(
            years = configs.len(),
            brackets = brackets.len(),
            states = states.len(),
            "parsed tax table rows"
        );

        Self::new(configs, brackets, states)
    }

    /// Loads `tax_years.csv`, `federal_brackets.csv` and `state_rates.csv`
    /// from a directory.
    pub fn load_dir(dir: &Path) -> Result<Self, TableLoadError> {
        let open = |name: &str| {
            let path = dir.join(name);
            File::open(&path).map_err(|source| TableLoadError::Io { path, source })
        };

        let tables = Self::from_readers(
            open(TAX_YEARS_FILE)?,
            open(FEDERAL_BRACKETS_FILE)?,
            open(STATE_RATES_FILE)?,
        )?;

        info!(
            dir = %dir.display(),
            years = ?tables.list_tax_years(),
            "loaded tax tables"
        );

        Ok(tables)
    }

    pub fn bracket_count(&self) -> usize {
        self.brackets.values().map(Vec::len).sum()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    fn require_year(
        &self,
        tax_year: i32,
    ) -> Result<(), TableError> {
        if self.years.contains_key(&tax_year) {
            Ok(())
        } else {
            Err(TableError::YearNotFound(tax_year))
        }
    }
}

impl TaxTableProvider for TaxTableSet {
    fn tax_year_config(
        &self,
        tax_year: i32,
    ) -> Result<TaxYearConfig, TableError> {
        self.years
            .get(&tax_year)
            .cloned()
            .ok_or(TableError::YearNotFound(tax_year))
    }

    fn list_tax_years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    fn federal_brackets(
        &self,
        tax_year: i32,
        filing_status: FilingStatusCode,
    ) -> Result<Vec<TaxBracket>, TableError> {
        self.require_year(tax_year)?;
        self.brackets
            .get(&(tax_year, filing_status))
            .cloned()
            .ok_or(TableError::NoBrackets {
                tax_year,
                filing_status,
            })
    }

    fn state_info(
        &self,
        tax_year: i32,
        code: &str,
    ) -> Result<StateTaxInfo, TableError> {
        self.require_year(tax_year)?;
        self.states
            .get(&(tax_year, code.to_string()))
            .cloned()
            .ok_or_else(|| TableError::StateNotFound {
                tax_year,
                code: code.to_string(),
            })
    }

    fn list_states(
        &self,
        tax_year: i32,
    ) -> Result<Vec<StateTaxInfo>, TableError> {
        self.require_year(tax_year)?;
        Ok(self
            .states
            .values()
            .filter(|s| s.tax_year == tax_year)
            .cloned()
            .collect())
    }
}
