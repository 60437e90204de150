use super::ui;
use crate::core::{ParseReport, RateMatrix};
use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::Cell;
use std::collections::BTreeSet;

/// Lists the currencies that can be picked as source and destination.
pub fn display_currencies(matrix: &RateMatrix) -> String {
    format!(
        "{} {}\n{} {}",
        ui::style_text("From:", ui::StyleType::Title),
        matrix.from_currencies().join(", "),
        ui::style_text("To:", ui::StyleType::Title),
        matrix.to_currencies().join(", "),
    )
}

/// Renders the matrix with base currencies as rows and target currencies as columns.
pub fn display_as_table(matrix: &RateMatrix, precision: usize) -> String {
    let targets: BTreeSet<&str> = matrix.iter().map(|(_, target, _)| target).collect();

    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell("1 unit of")];
    header.extend(targets.iter().map(|t| ui::header_cell(t)));
    table.set_header(header);

    for base in matrix.from_currencies() {
        let mut row = vec![Cell::new(&base)];
        row.extend(
            targets
                .iter()
                .map(|target| ui::rate_cell(matrix.rate(&base, target), precision)),
        );
        table.add_row(row);
    }

    table.to_string()
}

/// Summarises rows and cells the parser left out.
pub fn display_report(report: &ParseReport, fetched_at: Option<DateTime<Utc>>) -> String {
    let mut lines = Vec::new();
    if let Some(at) = fetched_at {
        lines.push(format!("Fetched at {}", at.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    lines.push(format!(
        "{} rows read, {} skipped without a base currency",
        report.rows_seen, report.skipped_rows
    ));
    for cell in &report.skipped_cells {
        lines.push(format!(
            "Ignored {} -> {}: '{}' is not a number",
            cell.base, cell.target, cell.text
        ));
    }
    ui::style_text(&lines.join("\n"), ui::StyleType::Subtle)
}

/// Renders the rate table and parse report, or the matrix as JSON.
pub fn render(
    matrix: &RateMatrix,
    report: &ParseReport,
    fetched_at: Option<DateTime<Utc>>,
    json: bool,
    precision: usize,
) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(matrix)?);
    }

    let table = if matrix.is_empty() {
        ui::style_text("The rate table has no currencies.", ui::StyleType::Error)
    } else {
        display_as_table(matrix, precision)
    };
    Ok(format!("{table}\n\n{}", display_report(report, fetched_at)))
}
