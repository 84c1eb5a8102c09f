use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use author_api::app::{create_app, AppState};
use author_api::telemetry;
use author_core::services::{SigningKey, TokenService, TokenServiceConfig};
use author_infra::database::{DatabasePool, MySqlTokenRepository, MySqlUserRepository};
use author_shared::config::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Both files are optional; values already set take precedence
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init(&config.logging)?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET not set, using the development secret");
    }

    info!(environment = %config.environment, "Starting Author API server");

    let pool = DatabasePool::new(&config.database)
        .await
        .context("Failed to connect to the database")?;

    let signing_key = SigningKey::from_secret(config.auth.jwt_secret().as_bytes())
        .context("Failed to build the signing key")?;

    let token_service = Arc::new(TokenService::new(
        Arc::new(MySqlUserRepository::new(pool.get_pool().clone())),
        Arc::new(MySqlTokenRepository::new(pool.get_pool().clone())),
        signing_key,
        TokenServiceConfig::from(&config.auth.jwt),
    ));

    let state = web::Data::new(AppState::new(token_service).with_database(pool.clone()));

    let bind_address = config.server.bind_address();
    info!(%bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(state.clone()))
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}
