use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use asset_ledger_api::{
    app,
    config::Config,
    jobs::{DayRolloverJob, JobScheduler, PoolMetricsJob},
    middleware::{init_metrics, logging::init_logging},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load().context("Failed to load configuration")?;

    init_logging(&config.logging)?;
    init_metrics()?;

    info!("Starting Asset Ledger API v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&(&config.database).into())
        .await
        .context("Failed to connect to database")?;

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;
    info!("Migrations completed");

    let mut scheduler = JobScheduler::new();
    scheduler.register(PoolMetricsJob::new(pool.clone()));
    if config.ledger.rollover_enabled {
        scheduler.register(DayRolloverJob::new(
            pool.clone(),
            config.ledger.rollover_interval_minutes,
        ));
    }
    scheduler.start();

    let addr = config.socket_addr()?;
    let app = app::create_app(config, pool).context("Invalid JWT key configuration")?;

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    scheduler.shutdown();
    scheduler.wait_for_shutdown(Duration::from_secs(10)).await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
