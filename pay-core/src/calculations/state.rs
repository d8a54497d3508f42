//! Flat-rate state income tax.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::models::StateTaxInfo;

/// State income tax on `taxable_income` at the state's flat rate, rounded
/// to cents. Zero for states without an income tax and for non-positive
/// income.
pub fn state_income_tax(
    state: &StateTaxInfo,
    taxable_income: Decimal,
) -> Decimal {
    let rate = state.effective_rate();
    if rate.is_zero() || taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let tax = round_half_up(taxable_income * rate);
    debug!(state = %state.code, %rate, state_tax = %tax, "applied state rate");
    tax
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn state(
        code: &str,
        rate: Decimal,
        has_no_income_tax: bool,
    ) -> StateTaxInfo {
        StateTaxInfo {
            tax_year: 2024,
            code: code.to_string(),
            name: code.to_string(),
            rate,
            has_no_income_tax,
        }
    }

    #[test]
    fn flat_rate_applies_to_taxable_income() {
        let ca = state("CA", dec!(0.0725), false);

        assert_eq!(state_income_tax(&ca, dec!(100000)), dec!(7250.00));
    }

    #[test]
    fn result_is_rounded_to_cents() {
        let il = state("IL", dec!(0.0495), false);

        // 37,440 × 0.0495 = 1,853.28
        assert_eq!(state_income_tax(&il, dec!(37440)), dec!(1853.28));
        // 1,234.56 × 0.0495 = 61.11072
        assert_eq!(state_income_tax(&il, dec!(1234.56)), dec!(61.11));
    }

    #[test]
    fn no_income_tax_state_is_zero() {
        let tx = state("TX", dec!(0), true);

        assert_eq!(state_income_tax(&tx, dec!(250000)), dec!(0));
    }

    #[test]
    fn no_income_tax_flag_wins_over_stray_rate() {
        let odd = state("ZZ", dec!(0.05), true);

        assert_eq!(state_income_tax(&odd, dec!(50000)), dec!(0));
    }

    #[test]
    fn zero_income_is_zero() {
        let ca = state("CA", dec!(0.0725), false);

        assert_eq!(state_income_tax(&ca, dec!(0)), dec!(0));
    }
}
