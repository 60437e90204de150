//! Typed failures of the rate pipeline.
//!
//! Every variant is recoverable: callers surface the message and let the user retry.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The fetched document has no rate table with the expected marker class.
    #[error("Rate table not found in the fetched document (expected table.{table_class})")]
    TableNotFound { table_class: String },

    /// The document could not be retrieved.
    #[error("Failed to fetch exchange rates: {0}")]
    TransportFailure(String),

    #[error("Invalid amount: '{0}' is not a finite number")]
    InvalidAmount(String),

    #[error("Both source and destination currencies must be selected")]
    MissingCurrencySelection,

    #[error("No exchange rate found from {from} to {to}")]
    RateNotFound { from: String, to: String },

    /// A zero (or vanishingly small) rate has no finite reciprocal. Reported per
    /// entry, never fatal.
    #[error("Rate from {base} to {target} has no finite reciprocal and cannot be inverted")]
    DivisionByZeroOnInvert { base: String, target: String },

    #[error("Exchange rates have not been loaded yet")]
    RatesNotLoaded,
}
