//! Park API server: reads config from env (and `.env`), prepares the database, serves the router.

use park_api::{app, apply_migrations, ensure_database_exists, AppState, PgParkStore, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("park_api=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    if config.create_database {
        ensure_database_exists(&config.database_url).await?;
    }
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    if config.run_migrations {
        apply_migrations(&pool).await?;
    }

    let state = AppState::new(Arc::new(PgParkStore::new(pool)));
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
