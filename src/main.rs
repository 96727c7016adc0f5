// SPDX-License-Identifier: BSD-3-Clause

use anyhow::{Context, Result};
use lamsa_server::app::{create_router, AppState, VERSION};
use lamsa_server::config::{Config, Environment};
use lamsa_server::services::auth::AuthService;
use lamsa_server::services::auth_db::AuthDbClient;
use lamsa_server::services::salon_db::SalonDbClient;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration must be valid before anything opens a connection.
    let config = Config::from_env().context("Invalid configuration")?;

    init_tracing(config.environment)?;
    info!(
        version = VERSION,
        environment = config.environment.as_str(),
        "Starting lamsa-server..."
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to Postgres")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let auth = Arc::new(AuthService::new(
        AuthDbClient::new(pool.clone()),
        config.session_max_age_days,
    ));
    let salon_db = SalonDbClient::new(pool);

    let state = AppState {
        auth,
        salon_db,
        config: Arc::new(config),
    };

    // Bind to 0.0.0.0 to accept connections from any network interface (required for Docker)
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "lamsa-server v{VERSION} listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Structured logs in production, human-readable ones in development.
fn init_tracing(environment: Environment) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(
        "lamsa_server=info"
            .parse()
            .context("Invalid default log directive")?,
    );

    match environment {
        Environment::Production => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        Environment::Development => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    Ok(())
}
