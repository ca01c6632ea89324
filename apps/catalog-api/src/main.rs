//! Catalog API - REST server for the product catalog

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");

    let db = database::postgres::connect_from_config_with_retry(&config.postgres, None)
        .await
        .map_err(|e| eyre::eyre!("Failed to connect to PostgreSQL: {}", e))?;

    database::postgres::run_migrations::<Migrator>(&db, "catalog-api").await?;

    // Initialize the application state
    let state = AppState {
        config: config.clone(),
        db,
    };

    // Build REST router
    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router.merge(health_router(state.config.app));

    info!("Starting Catalog API on port {}", state.config.server.port);

    // Run server with graceful shutdown
    let db_for_cleanup = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL connections");
            db_for_cleanup.close().await.ok();
            info!("PostgreSQL connection closed");
        },
    )
    .await?;

    info!("Catalog API shutdown complete");
    Ok(())
}
