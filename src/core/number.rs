//! Lenient number reading for spreadsheet cells and user input.

use crate::core::error::ConversionError;
use regex::Regex;
use std::sync::LazyLock;

static DECIMAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("decimal prefix pattern is valid")
});

/// Reads the leading decimal number of `text`.
///
/// Surrounding whitespace is ignored and every `,` counts as a decimal point, so
/// locale formatted cells such as `"1,5"` read as `1.5`. Trailing text after the
/// number is ignored (`"12.5 %"` reads as `12.5`). Returns `None` when the text
/// does not start with a number.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    let literal = DECIMAL_PREFIX.find(&normalized)?.as_str();
    literal.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads a user supplied amount. Unlike [`parse_decimal`] the whole input must be
/// a number.
pub fn parse_amount(text: &str) -> Result<f64, ConversionError> {
    let normalized = text.trim().replace(',', ".");
    let invalid = || ConversionError::InvalidAmount(text.trim().to_string());

    match DECIMAL_PREFIX.find(&normalized) {
        Some(m) if m.end() == normalized.len() => normalized
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}
