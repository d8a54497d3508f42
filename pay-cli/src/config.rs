//! Defaults read from a TOML file passed with `--config`.
//!
//! ```toml
//! tax_year = 2026
//! state = "CA"
//! filing_status = "MFJ"
//! hours_per_week = 37.5
//! log_level = "debug"
//! ```
//!
//! Every key is optional. Command-line flags win over the file.

use std::fs;
use std::path::{Path, PathBuf};

use pay_core::FilingStatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown filing status '{0}' in config (expected S, MFJ, MFS, HOH or QSS)")]
    FilingStatus(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub tax_year: Option<i32>,
    pub state: Option<String>,
    pub filing_status: Option<String>,
    pub hours_per_week: Option<Decimal>,
    pub log_level: Option<String>,
}

impl CliConfig {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` when given, otherwise returns empty defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn filing_status(&self) -> Result<Option<FilingStatusCode>, ConfigError> {
        self.filing_status
            .as_deref()
            .map(|s| FilingStatusCode::parse(s).ok_or_else(|| ConfigError::FilingStatus(s.into())))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parses_all_keys() {
        let config = CliConfig::parse(
            r#"
            tax_year = 2026
            state = "ca"
            filing_status = "mfj"
            hours_per_week = 37.5
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.tax_year, Some(2026));
        assert_eq!(config.state.as_deref(), Some("ca"));
        assert_eq!(config.hours_per_week, Some(dec!(37.5)));
        assert_eq!(
            config.filing_status().unwrap(),
            Some(FilingStatusCode::MarriedFilingJointly)
        );
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(CliConfig::parse("").unwrap(), CliConfig::default());
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(CliConfig::parse("stat = \"CA\"").is_err());
    }

    #[test]
    fn bad_filing_status_is_reported() {
        let config = CliConfig {
            filing_status: Some("married".to_string()),
            ..CliConfig::default()
        };

        assert!(matches!(
            config.filing_status(),
            Err(ConfigError::FilingStatus(s)) if s == "married"
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = CliConfig::load(Path::new("/nonexistent/paycalc.toml"));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
