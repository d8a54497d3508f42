use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatusCode;

/// One row of a federal rate schedule.
///
/// `upper_bound` is `None` for the top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub tax_year: i32,
    pub filing_status: FilingStatusCode,
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub marginal_rate: Decimal,
}

impl TaxBracket {
    /// Width of the bracket, or `None` when it is unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.upper_bound.map(|upper| upper - self.lower_bound)
    }

    /// Whether `income` falls inside this bracket. The lower bound is
    /// exclusive and the upper bound inclusive, so income sitting exactly on
    /// a boundary belongs to the lower bracket.
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income > self.lower_bound && self.upper_bound.is_none_or(|upper| income <= upper)
    }
}
