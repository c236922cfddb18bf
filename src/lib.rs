pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::conversion::Direction;
use crate::core::{PublishedState, SyncOrchestrator};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Status,
    Rate,
    Convert { amount: String, direction: Direction },
    Quote,
}

/// Wires the HTTP fetchers and a fresh state into an orchestrator.
pub fn build_orchestrator(config: &AppConfig) -> SyncOrchestrator {
    let http = providers::HttpSettings::from(&config.http);
    let rate_fetcher = providers::PyDolarProvider::new(
        &config.providers.rate.base_url,
        &config.providers.rate.monitor,
        http.clone(),
    );
    let quote_fetcher = providers::FraseProvider::new(&config.providers.quote.base_url, http);

    SyncOrchestrator::new(
        Arc::new(rate_fetcher),
        Arc::new(quote_fetcher),
        Arc::new(PublishedState::new()),
        &config.fallback_quote,
    )
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Tasa starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let sync = build_orchestrator(&config);
    let handles = sync.start();

    match command {
        AppCommand::Status => cli::status::run(&sync, handles).await,
        AppCommand::Quote => cli::status::run_quote(&sync, handles).await,
        AppCommand::Rate => cli::convert::run_snapshot(&sync, handles).await,
        AppCommand::Convert { amount, direction } => {
            cli::convert::run(&sync, handles, &amount, direction).await
        }
    }
}
