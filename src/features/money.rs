use rust_decimal::prelude::*;
use serde::Serializer;

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as US dollars, e.g. `$1,234.50` or `-$5.00`.
pub fn currency(amount: Decimal) -> String {
    let rounded = to_cents(amount);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };

    // Near Decimal::MAX there is no room left for a fractional part
    let magnitude = rounded.abs();
    let whole = magnitude.trunc().normalize().to_string();
    let cents = (magnitude.fract() * Decimal::ONE_HUNDRED)
        .trunc()
        .normalize()
        .to_string();

    format!("{sign}${}.{cents:0>2}", group_thousands(&whole))
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub(crate) fn round_serialize<S>(amount: &Decimal, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // Serialize to cents
    let rounded_amount = to_cents(*amount).to_string();
    s.serialize_str(rounded_amount.as_str())
}
