pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::ui;
use crate::core::config::AppConfig;
use crate::core::session::{self, Session};
use crate::core::{ConversionError, ConversionRequest};
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Currencies,
    Rates {
        json: bool,
    },
    Convert {
        from: String,
        to: String,
        amount: String,
        swap: bool,
    },
}

/// Runs `command` and prints its output.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let is_conversion = matches!(command, AppCommand::Convert { .. });
    let output = render_command(command, config_path).await?;
    if is_conversion {
        cli::convert::print(&output);
    } else {
        println!("{output}");
    }
    Ok(())
}

/// Runs `command` and returns the text it would print.
pub async fn render_command(command: AppCommand, config_path: Option<&str>) -> Result<String> {
    info!("Ratesheet starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    // Reject bad input before going to the network
    let request = match &command {
        AppCommand::Convert {
            from, to, amount, ..
        } => {
            if from.trim().is_empty() || to.trim().is_empty() {
                return Err(ConversionError::MissingCurrencySelection.into());
            }
            Some(ConversionRequest::from_input(from, to, amount)?)
        }
        _ => None,
    };

    let provider =
        providers::GoogleSheetsProvider::new(&config.source.url, config.source.retries);
    let mut session = Session::new();

    let spinner = ui::new_spinner("Fetching exchange rates...");
    let loaded = session::load(&mut session, &provider, &config.source.table_class).await;
    spinner.finish_and_clear();
    let report = loaded?;

    let Some(matrix) = session.matrix() else {
        return Err(ConversionError::RatesNotLoaded.into());
    };
    let precision = config.display.precision;

    match (command, request) {
        (AppCommand::Currencies, _) => Ok(cli::rates::display_currencies(matrix)),
        (AppCommand::Rates { json }, _) => {
            cli::rates::render(matrix, &report, session.fetched_at(), json, precision)
        }
        (AppCommand::Convert { swap, .. }, Some(request)) => {
            cli::convert::run(&mut session, &request, swap, precision)
        }
        (AppCommand::Convert { .. }, None) => Err(ConversionError::MissingCurrencySelection.into()),
    }
}
