//! Display formatting for money and rates.
//!
//! Engine values keep full precision; rounding for display happens here only.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as US dollars with two decimals and thousands
/// separators, e.g. `-$1,234.57`.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a value that is already a percentage, e.g. `19.03` → `19.0%`.
pub fn format_percent(
    percent: Decimal,
    decimals: u32,
) -> String {
    let rounded = percent.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}%", decimals as usize, rounded)
}

/// Formats a fractional rate as a percentage, e.g. `0.0725` → `7.25%`.
pub fn format_rate(
    rate: Decimal,
    decimals: u32,
) -> String {
    format_percent(rate * Decimal::ONE_HUNDRED, decimals)
}
