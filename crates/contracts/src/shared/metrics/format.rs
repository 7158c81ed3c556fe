//! Number formatting for metric values.

use serde::{Deserialize, Serialize};

use super::catalog::Unit;

/// Placeholder for values that are unknown (no data, NaN, infinite).
pub const NO_DATA: &str = "-";

/// Separators and currency symbol used when rendering numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberLocale {
    pub currency_symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl NumberLocale {
    pub fn pt_br() -> Self {
        Self {
            currency_symbol: "R$".into(),
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::pt_br()
    }
}

/// Format with the default (pt-BR) locale.
///
/// ```
/// use contracts::shared::metrics::{format_value, Unit};
/// assert_eq!(format_value(Some(1500.0), Unit::Currency), "R$ 1.500,00");
/// assert_eq!(format_value(None, Unit::Number), "-");
/// ```
pub fn format_value(value: Option<f64>, unit: Unit) -> String {
    format_value_with(value, unit, &NumberLocale::default())
}

pub fn format_value_with(value: Option<f64>, unit: Unit, locale: &NumberLocale) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return NO_DATA.to_string();
    };

    match unit {
        Unit::Currency => {
            let (negative, body) = fixed(v, 2, false, locale);
            let sign = if negative { "-" } else { "" };
            format!("{}{} {}", sign, locale.currency_symbol, body)
        }
        Unit::Multiplier => format!("{}x", signed(v, 2, true, locale)),
        Unit::Percentage => format!("{}%", signed(v, 1, false, locale)),
        Unit::Number => signed(v, 2, true, locale),
    }
}

/// Group an integer's digits, e.g. for byte counts in logs.
///
/// ```
/// use contracts::shared::metrics::format::group_thousands;
/// assert_eq!(group_thousands(1234567, '.'), "1.234.567");
/// ```
pub fn group_thousands(n: u64, separator: char) -> String {
    group_digits(&n.to_string(), separator)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(separator);
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

fn signed(value: f64, decimals: usize, trim: bool, locale: &NumberLocale) -> String {
    let (negative, body) = fixed(value, decimals, trim, locale);
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

/// Render `|value|` with `decimals` places and grouped integer digits.
/// Returns whether a minus sign is due (never for a value that rounds to 0).
fn fixed(value: f64, decimals: usize, trim: bool, locale: &NumberLocale) -> (bool, String) {
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, f),
        None => (raw.as_str(), ""),
    };

    let frac = if trim {
        frac_part.trim_end_matches('0')
    } else {
        frac_part
    };

    let mut body = group_digits(int_part, locale.thousands_separator);
    if !frac.is_empty() {
        body.push(locale.decimal_separator);
        body.push_str(frac);
    }

    let is_zero = raw.chars().all(|c| c == '0' || c == '.');
    (value < 0.0 && !is_zero, body)
}
