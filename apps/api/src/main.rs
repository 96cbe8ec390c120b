//! Alumnet API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use alumnet_core::AppError;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, init_tracing};
use crate::api_services::{
    RecordStores, build_app_state, build_memory_session_layer, build_postgres_session_layer,
    connect_and_migrate,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let address = config.socket_address()?;

    let router = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = connect_and_migrate(database_url, config.database_max_connections).await?;
            if config.migrate_only {
                info!("database migrations applied successfully");
                return Ok(());
            }

            let session_layer =
                build_postgres_session_layer(pool.clone(), config.cookie_secure).await?;
            let app_state = build_app_state(
                RecordStores::postgres(&pool, config.store_timeout),
                config.bootstrap_token.clone(),
            );
            api_router::build_router(app_state, &config.frontend_url, session_layer)?
        }
        None => {
            warn!("DATABASE_URL is not set; records and sessions are kept in memory only");
            let app_state =
                build_app_state(RecordStores::in_memory(), config.bootstrap_token.clone());
            api_router::build_router(
                app_state,
                &config.frontend_url,
                build_memory_session_layer(config.cookie_secure),
            )?
        }
    };

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind API listener: {error}")))?;

    info!(%address, "alumnet api listening");

    axum::serve(listener, router)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
