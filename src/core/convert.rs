//! Rate lookup and amount conversion.

use crate::core::error::ConversionError;
use crate::core::number::parse_amount;
use crate::core::rates::RateMatrix;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl ConversionRequest {
    pub fn new(from: &str, to: &str, amount: f64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        }
    }

    /// Builds a request from raw user input, reading the amount leniently.
    pub fn from_input(from: &str, to: &str, amount: &str) -> Result<Self, ConversionError> {
        Ok(Self::new(from.trim(), to.trim(), parse_amount(amount)?))
    }
}

/// A successful conversion at full precision.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub rate: f64,
    pub result: f64,
}

impl Conversion {
    /// Formats as `"{amount} {from} = {result} {to}"` with `precision` fractional digits.
    pub fn display_with_precision(&self, precision: usize) -> String {
        format!(
            "{} {} = {:.precision$} {}",
            self.amount, self.from, self.result, self.to
        )
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with_precision(8))
    }
}

/// Converts `request.amount` from `request.from` to `request.to` using `matrix`.
pub fn convert(
    matrix: &RateMatrix,
    request: &ConversionRequest,
) -> Result<Conversion, ConversionError> {
    if !request.amount.is_finite() {
        return Err(ConversionError::InvalidAmount(request.amount.to_string()));
    }
    if request.from.is_empty() || request.to.is_empty() {
        return Err(ConversionError::MissingCurrencySelection);
    }

    let rate = matrix
        .rate(&request.from, &request.to)
        .ok_or_else(|| ConversionError::RateNotFound {
            from: request.from.clone(),
            to: request.to.clone(),
        })?;

    Ok(Conversion {
        from: request.from.clone(),
        to: request.to.clone(),
        amount: request.amount,
        rate,
        result: request.amount * rate,
    })
}
