use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::InvalidInputError;

/// Pay-period frequency used to express and convert income figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayCadence {
    Hourly,
    Weekly,
    Biweekly,
    Semimonthly,
    Monthly,
    #[default]
    Annual,
}

impl PayCadence {
    pub fn all() -> &'static [PayCadence] {
        &[
            Self::Hourly,
            Self::Weekly,
            Self::Biweekly,
            Self::Semimonthly,
            Self::Monthly,
            Self::Annual,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Semimonthly => "semimonthly",
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hourly => "Hourly",
            Self::Weekly => "Weekly",
            Self::Biweekly => "Bi-weekly",
            Self::Semimonthly => "Semi-monthly",
            Self::Monthly => "Monthly",
            Self::Annual => "Annual",
        }
    }

    /// Number of pay periods in a year. Hourly pay has no fixed period
    /// count; its multiplier depends on hours worked per week.
    pub fn periods_per_year(&self) -> Option<Decimal> {
        match self {
            Self::Hourly => None,
            Self::Weekly => Some(Decimal::from(52)),
            Self::Biweekly => Some(Decimal::from(26)),
            Self::Semimonthly => Some(Decimal::from(24)),
            Self::Monthly => Some(Decimal::from(12)),
            Self::Annual => Some(Decimal::ONE),
        }
    }
}

impl fmt::Display for PayCadence {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayCadence {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "hourly" | "hour" => Ok(Self::Hourly),
            "weekly" | "week" => Ok(Self::Weekly),
            "biweekly" | "fortnightly" => Ok(Self::Biweekly),
            "semimonthly" | "twicemonthly" => Ok(Self::Semimonthly),
            "monthly" | "month" => Ok(Self::Monthly),
            "annual" | "annually" | "yearly" | "year" | "salary" => Ok(Self::Annual),
            _ => Err(InvalidInputError::UnknownCadence(s.to_string())),
        }
    }
}
