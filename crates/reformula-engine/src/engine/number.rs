//! Number normalization for raw cell values.
//!
//! Exported sheets often carry numbers as formatted text: `1,234.50`,
//! `$1,000`, or accounting negatives such as `(250)`. Everything that does not
//! survive normalization is non-numeric (`None`), never an error.

use super::grid::RawValue;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Normalize a raw value into a number.
///
/// Blank values are the caller's concern: `Empty` and whitespace-only text
/// come back as `None` here.
pub fn parse_number(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Number(n) if n.is_finite() => Some(*n),
        RawValue::Number(_) | RawValue::Empty => None,
        RawValue::Text(s) => parse_number_str(s),
    }
}

/// Normalize formatted numeric text.
///
/// Trims, drops thousands separators, turns `(x)` into `-x`, strips a leading
/// currency symbol, then parses what is left.
pub fn parse_number_str(text: &str) -> Option<f64> {
    let mut value = text.trim().replace(',', "");

    if value.len() >= 2 && value.starts_with('(') && value.ends_with(')') {
        value = format!("-{}", &value[1..value.len() - 1]);
    }

    let (negative, rest) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.as_str()),
    };
    let rest = match rest.strip_prefix(CURRENCY_SYMBOLS) {
        Some(amount) => amount.trim(),
        None => rest,
    };
    if negative && rest.starts_with(['-', '+']) {
        return None;
    }

    let n = rest.parse::<f64>().ok().filter(|n| n.is_finite())?;
    Some(if negative { -n } else { n })
}
