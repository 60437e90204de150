use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ratesheet::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for ratesheet::AppCommand {
    fn from(cmd: Commands) -> ratesheet::AppCommand {
        match cmd {
            Commands::Currencies => ratesheet::AppCommand::Currencies,
            Commands::Rates { json } => ratesheet::AppCommand::Rates { json },
            Commands::Convert {
                from,
                to,
                amount,
                swap,
            } => ratesheet::AppCommand::Convert {
                from,
                to,
                amount,
                swap,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List currencies available for conversion
    Currencies,
    /// Display the exchange rate table
    Rates {
        /// Print the rates as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert an amount between two currencies
    Convert {
        /// Currency to convert from
        from: String,
        /// Currency to convert to
        to: String,
        /// Amount to convert, "," or "." as decimal separator
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Invert the rate table first, for sheets that only list the other direction
        #[arg(short, long)]
        swap: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => ratesheet::cli::setup::setup(),
        Some(cmd) => ratesheet::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
