pub mod cli;
pub mod core;
pub mod gui;
pub mod providers;

use crate::core::Currency;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: Currency,
        to: Currency,
    },
    Rates {
        base: Currency,
    },
}

/// Runs a headless command against the configured rate provider.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = AppConfig::load(config_path)?;
    debug!("Loaded config: {config:#?}");

    let provider = Arc::new(providers::ExchangeRateApiProvider::new(&config.provider)?);

    match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run_convert(&amount, from, to, provider, &config.display).await?;
        }
        AppCommand::Rates { base } => {
            cli::rates::run_rates(base, provider.as_ref(), config.display.decimal_places).await?;
        }
    }
    Ok(())
}

/// Opens the converter window. Requires an entered tokio runtime.
pub fn run_gui(config_path: Option<&str>) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    debug!("Loaded config: {config:#?}");

    let provider = Arc::new(providers::ExchangeRateApiProvider::new(&config.provider)?);
    gui::run(&config, provider)
}
