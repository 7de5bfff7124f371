use axum::Router;
use axum_helpers::server::create_production_app;
use core_config::server::ServerConfig;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{PostgresUserRepository, UserUseCases};
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config(config.database.clone())
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    let repository = Arc::new(PostgresUserRepository::new(db.clone()));
    let state = AppState {
        db,
        users: UserUseCases::new(repository),
    };

    let app = build_app(&state, &config.server);

    info!(
        shutdown_timeout = ?config.shutdown_timeout,
        "Starting users API"
    );

    create_production_app(app, &config.server, config.shutdown_timeout, async move {
        info!("Shutting down: closing database connections");
        match state.db.close().await {
            Ok(()) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}

/// Domain routes and `/ready`, wrapped by `create_router` in docs, middleware and `/health`.
fn build_app(state: &AppState, server: &ServerConfig) -> Router {
    let apis = api::routes(state).merge(api::ready_router(state.clone()));
    axum_helpers::create_router::<openapi::ApiDoc>(apis, server)
}
