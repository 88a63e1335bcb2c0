use std::sync::Arc;

use premium_ledger::server::{
    config::Config,
    data::store::SeaOrmLedgerStore,
    error::Error,
    scheduler::{
        orchestrator::{LedgerOrchestrator, OrchestratorSettings},
        LedgerScheduler,
    },
    startup,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("premium_ledger=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(config).await {
        tracing::error!("Premium ledger stopped: {}", e);
        std::process::exit(1);
    }
}

async fn serve(config: Config) -> Result<(), Error> {
    let db = startup::connect_to_database(&config).await?;
    let cache = startup::connect_to_cache(&config).await?;

    let settings = OrchestratorSettings {
        timezone: config.business_timezone,
        batch_pause: config.batch_pause,
        ..OrchestratorSettings::default()
    };
    let orchestrator = Arc::new(
        LedgerOrchestrator::new(Arc::new(SeaOrmLedgerStore::new(db)), cache)
            .with_settings(settings),
    );

    if config.run_on_startup {
        tracing::info!("Running startup catch-up");
        if let Err(e) = orchestrator.run_manual(false).await {
            tracing::error!("Startup catch-up failed: {}", e);
        }
    }

    let mut scheduler = LedgerScheduler::new(orchestrator).await?;
    scheduler
        .start(&config.cron_expression, config.business_timezone)
        .await?;

    tracing::info!("Premium ledger running, press Ctrl-C to stop");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    tracing::info!("Shutting down scheduler");
    scheduler.shutdown().await?;

    Ok(())
}
