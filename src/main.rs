use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fxconv::core::Currency;
use fxconv::core::log::init_logging;

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

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => {
                fxconv::AppCommand::Convert { amount, from, to }
            }
            Commands::Rates { base } => fxconv::AppCommand::Rates { base },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount without opening the window
    Convert {
        /// Amount in the source currency
        amount: String,
        /// Currency to convert from (USD, NPR, EUR, INR, GBP, JPY)
        from: Currency,
        /// Currency to convert to
        to: Currency,
    },
    /// Show the latest rates from a base currency
    Rates {
        /// Base currency
        base: Currency,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let config_path = cli.config_path.as_deref();

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => runtime.block_on(fxconv::run_command(cmd.into(), config_path)),
        None => {
            let _guard = runtime.enter();
            fxconv::run_gui(config_path)
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
