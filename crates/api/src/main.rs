use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;

use sisf_site_api::app::{build_router, AppState};
use sisf_site_api::jobs::{ContextCachePruneJob, JobScheduler, PoolMetricsJob};
use sisf_site_api::{config, middleware, services};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics()?;

    info!("Starting SISF site backend v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&config.pool_config()).await?;

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;
    info!("Migrations completed");

    let outcome = services::bootstrap_admin_key(&pool, &config.security).await?;
    info!(?outcome, "Admin key bootstrap finished");

    let addr = config.socket_addr()?;
    let state = AppState::new(config, pool);

    let mut scheduler = JobScheduler::new();
    scheduler.register(PoolMetricsJob::new(state.pool.clone()));
    scheduler.register(ContextCachePruneJob::new(state.context_cache.clone()));
    scheduler.start();

    let app = build_router(state);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    scheduler.shutdown();
    scheduler.wait_for_shutdown(Duration::from_secs(5)).await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
