use super::ui;
use crate::core::{ConversionRequest, Session};
use anyhow::Result;
use tracing::warn;

/// Converts `request` against the loaded rates and returns the formatted line.
///
/// With `swap` the matrix is inverted first, so a sheet that only lists rates
/// from A to B can still convert from B to A.
pub fn run(
    session: &mut Session,
    request: &ConversionRequest,
    swap: bool,
    precision: usize,
) -> Result<String> {
    if swap {
        let anomalies = session.swap_direction()?;
        for anomaly in &anomalies {
            warn!("{anomaly}");
        }
    }

    let conversion = session.convert(request)?;
    Ok(conversion.display_with_precision(precision))
}

pub fn print(line: &str) {
    println!("{}", ui::style_text(line, ui::StyleType::Result));
}
