//! Extracts a [`RateMatrix`] from a published spreadsheet rendered as HTML.
//!
//! Expected layout inside `table.<class> tbody`:
//!
//! * row 0 is the header row; cell `i > 0` names the target currency at header
//!   position `i - 1`, cell 0 is ignored
//! * every later row is one base currency: cell 1 holds the base code and each
//!   cell `i > 0` whose header position `i - 1` is non-empty holds a rate

use crate::core::error::ConversionError;
use crate::core::number::parse_decimal;
use crate::core::rates::RateMatrix;
use scraper::{CaseSensitivity, ElementRef, Html, Selector};
use tracing::debug;

/// Marker class of the table in a published Google Sheet.
pub const DEFAULT_TABLE_CLASS: &str = "waffle";

/// A rate cell that was present under a header but did not hold a number.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedCell {
    pub base: String,
    pub target: String,
    pub text: String,
}

/// What the parser saw besides the rates themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub headers: Vec<String>,
    /// Body rows after the header row.
    pub rows_seen: usize,
    /// Rows with no base currency, or too few cells to hold one.
    pub skipped_rows: usize,
    pub skipped_cells: Vec<SkippedCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub matrix: RateMatrix,
    pub report: ParseReport,
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn cell_texts(row: ElementRef<'_>, cell_selector: &Selector) -> Vec<String> {
    row.select(cell_selector)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect()
}

/// Reads a rate cell. Negative values are not rates and count as unreadable.
fn parse_rate(text: &str) -> Option<f64> {
    parse_decimal(text).filter(|rate| *rate >= 0.0)
}

/// Parses the rate table marked with `table_class` out of `html`.
///
/// Cells that do not hold a non-negative number are left out of the matrix and
/// recorded in the [`ParseReport`]; only a missing table is an error.
pub fn parse_rate_table(html: &str, table_class: &str) -> Result<ParsedTable, ConversionError> {
    let not_found = || ConversionError::TableNotFound {
        table_class: table_class.to_string(),
    };

    let (Some(table_selector), Some(row_selector), Some(cell_selector)) = (
        selector("table"),
        selector("tbody tr"),
        selector("td, th"),
    ) else {
        return Err(not_found());
    };

    let document = Html::parse_document(html);
    let table = document
        .select(&table_selector)
        .find(|t| {
            t.value()
                .has_class(table_class, CaseSensitivity::CaseSensitive)
        })
        .ok_or_else(not_found)?;

    let mut matrix = RateMatrix::new();
    let mut report = ParseReport::default();

    for (row_index, row) in table.select(&row_selector).enumerate() {
        let cells = cell_texts(row, &cell_selector);

        if row_index == 0 {
            report.headers = cells.into_iter().skip(1).collect();
            debug!(headers = ?report.headers, "Parsed header row");
            continue;
        }

        report.rows_seen += 1;
        let base = match cells.get(1) {
            Some(code) if !code.is_empty() => code.clone(),
            _ => {
                debug!(row_index, "Skipping row without a base currency");
                report.skipped_rows += 1;
                continue;
            }
        };

        matrix.reset_row(&base);
        for (column, text) in cells.iter().enumerate().skip(1) {
            let Some(target) = report.headers.get(column - 1).filter(|h| !h.is_empty()) else {
                continue;
            };
            match parse_rate(text) {
                Some(rate) => matrix.insert(&base, target, rate),
                None => {
                    debug!(base = %base, target = %target, text = %text, "Skipping rate cell without a usable number");
                    report.skipped_cells.push(SkippedCell {
                        base: base.clone(),
                        target: target.clone(),
                        text: text.clone(),
                    });
                }
            }
        }
    }

    debug!(
        rates = matrix.len(),
        rows = report.rows_seen,
        skipped_rows = report.skipped_rows,
        skipped_cells = report.skipped_cells.len(),
        "Parsed rate table"
    );
    Ok(ParsedTable { matrix, report })
}
