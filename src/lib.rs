pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{Currency, Session};
use anyhow::Result;
use std::io::BufReader;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: Option<Currency>,
        to: Option<Currency>,
    },
    Rates,
    Interactive,
}

/// Builds a session backed by the configured rate provider.
pub fn build_session(config: &AppConfig) -> Result<Session> {
    let api_key = config.provider.api_key()?;
    let provider = providers::ExchangeRateApiProvider::new(&config.provider.base_url, api_key);
    Ok(Session::new(Box::new(provider), config.selection()))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {:?}", config.selection());

    let mut session = build_session(&config)?;
    let mut out = std::io::stdout();

    match command {
        AppCommand::Convert { amount, from, to } => {
            if let Some(from) = from {
                session.set_from(from);
            }
            if let Some(to) = to {
                session.set_to(to);
            }
            cli::convert::run(&mut session, &amount, &mut out).await
        }
        AppCommand::Rates => cli::rates::run(&mut session, &mut out).await,
        AppCommand::Interactive => {
            let input = BufReader::new(std::io::stdin());
            cli::interactive::run(&mut session, input, &mut out).await
        }
    }
}
