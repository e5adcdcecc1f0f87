pub mod commands;
pub mod modules;
mod schema;
pub mod shared;

use anyhow::Context;
use commands::build_router;
use modules::{
    gateway::DownstreamGateways,
    subscription::{
        AggregationEngine, AppState, DieselEdgeStore, EdgeStore, SubscriptionService,
    },
};
use shared::{utils::logger::init_logger, Config, Database};
use std::sync::Arc;

/// Wire the service from the environment and serve until ctrl-c
pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_logger();
    log::info!("Starting {} service", config.service_name);

    let database = Arc::new(
        Database::new(&config.database_url, config.db_max_connections)
            .context("Failed to initialize database pool")?,
    );

    // Migrations hold a pooled connection for their whole run
    let migrator = Arc::clone(&database);
    tokio::task::spawn_blocking(move || migrator.run_migrations())
        .await
        .context("Migration task panicked")?
        .context("Failed to run database migrations")?;

    let gateways = DownstreamGateways::connect(&config.downstream, config.request_timeout)
        .context("Failed to build downstream clients")?;
    log::info!(
        "Downstream services: user={}, media={}, watchlist={}, review={}",
        config.downstream.user_service,
        config.downstream.media_service,
        config.downstream.watchlist_service,
        config.downstream.review_service
    );

    // Handles are constructed once and shared by every request
    let edge_store: Arc<dyn EdgeStore> = Arc::new(DieselEdgeStore::new(Arc::clone(&database)));
    let aggregation = Arc::new(AggregationEngine::with_gateways(
        Arc::clone(&edge_store),
        gateways,
    ));
    let service = Arc::new(SubscriptionService::new(edge_store, aggregation));

    let app = build_router(AppState {
        service,
        service_name: config.service_name.clone(),
        default_timeout: config.request_timeout,
        db: Some(database),
    });

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    log::info!("{} listening on {}", config.service_name, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("{} stopped", config.service_name);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
