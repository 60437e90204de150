//! The exchange rate matrix and its inversion.

use crate::core::error::ConversionError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Rates keyed by base currency, then target currency.
///
/// `rates[base][target] = r` means one unit of `base` buys `r` units of `target`.
/// Codes are kept exactly as they appear in the source table. The matrix need not
/// be square or symmetric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateMatrix {
    rates: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Result of [`RateMatrix::invert`]: the reciprocal matrix plus entries that could
/// not be inverted.
#[derive(Debug, Clone, PartialEq)]
pub struct Inversion {
    pub matrix: RateMatrix,
    pub anomalies: Vec<ConversionError>,
}

impl RateMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh row for `base`, dropping any rates recorded for it earlier.
    pub fn reset_row(&mut self, base: &str) {
        self.rates.insert(base.to_string(), BTreeMap::new());
    }

    pub fn insert(&mut self, base: &str, target: &str, rate: f64) {
        self.rates
            .entry(base.to_string())
            .or_default()
            .insert(target.to_string(), rate);
    }

    pub fn rate(&self, base: &str, target: &str) -> Option<f64> {
        self.rates.get(base)?.get(target).copied()
    }

    pub fn row(&self, base: &str) -> Option<&BTreeMap<String, f64>> {
        self.rates.get(base)
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.values().map(BTreeMap::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.rates.iter().flat_map(|(base, row)| {
            row.iter()
                .map(move |(target, rate)| (base.as_str(), target.as_str(), *rate))
        })
    }

    /// Currencies that can be converted from, including rows without any rates.
    pub fn from_currencies(&self) -> Vec<String> {
        self.rates.keys().cloned().collect()
    }

    /// Currencies that can be converted to. Zero rates do not count.
    pub fn to_currencies(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, _, rate)| *rate != 0.0)
            .map(|(_, target, _)| target.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Builds the reciprocal matrix: `rates[b][t] = r` becomes `inverted[t][b] = 1 / r`.
    ///
    /// Rates without a finite reciprocal (zero, or so small that `1 / r` overflows)
    /// are skipped and reported as [`ConversionError::DivisionByZeroOnInvert`].
    pub fn invert(&self) -> Inversion {
        let mut matrix = RateMatrix::new();
        let mut anomalies = Vec::new();

        for (base, target, rate) in self.iter() {
            let inverse = 1.0 / rate;
            if !inverse.is_finite() {
                warn!(base, target, rate, "Skipping rate without a finite reciprocal");
                anomalies.push(ConversionError::DivisionByZeroOnInvert {
                    base: base.to_string(),
                    target: target.to_string(),
                });
                continue;
            }
            matrix.insert(target, base, inverse);
        }

        debug!(
            entries = matrix.len(),
            skipped = anomalies.len(),
            "Inverted rate matrix"
        );
        Inversion { matrix, anomalies }
    }
}
