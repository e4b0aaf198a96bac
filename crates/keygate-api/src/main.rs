//! Keygate API server

use keygate_api::store::{PostgresRevocationStore, PostgresUserStore};
use keygate_api::{create_router, AppState};
use keygate_core::config::AppConfig;
use keygate_core::store::{
    MemoryRevocationStore, MemoryUserStore, RevocationStore, UserStore,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // RUST_LOG wins; otherwise the configured level applies to this crate.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "keygate_api={},tower_http=debug",
                    config.logging.level
                ))
            }),
        )
        .init();

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let (users, revocations): (Arc<dyn UserStore>, Arc<dyn RevocationStore>) =
        match &config.database.url {
            Some(url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.database.pool_size.max(1))
                    .connect(url)
                    .await?;
                tracing::info!("connected to database");
                (
                    Arc::new(PostgresUserStore::new(pool.clone())),
                    Arc::new(PostgresRevocationStore::new(pool)),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory stores (non-persistent)");
                (
                    Arc::new(MemoryUserStore::new()),
                    Arc::new(MemoryRevocationStore::new()),
                )
            }
        };

    let state = Arc::new(AppState::new(config, users, revocations));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("keygate API server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
