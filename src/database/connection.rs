use std::sync::Arc;

use sqlx::{PgPool, SqlitePool, postgres::PgPoolOptions, sqlite::SqlitePoolOptions};

use crate::{
    config::{DatabaseConfig, Dialect},
    error::Result,
    queries::{PgProductRepository, ProductRepository, SqliteProductRepository},
};

/// Connects to the configured store, syncs the `products` schema, and hands
/// back the repository the handlers will use.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn ProductRepository>> {
    let repository: Arc<dyn ProductRepository> = match config.dialect {
        Dialect::Postgres => Arc::new(PgProductRepository::new(create_pg_pool(config).await?)),
        Dialect::Sqlite => {
            Arc::new(SqliteProductRepository::new(create_sqlite_pool(config).await?))
        }
    };

    repository.sync_schema().await?;
    tracing::info!("Products schema synced");

    Ok(repository)
}

pub async fn create_pg_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    tracing::info!(
        "PostgreSQL connection established with {} max connections",
        config.max_connections
    );

    Ok(pool)
}

pub async fn create_sqlite_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    // Every in-memory connection is a separate database, so the pool keeps
    // exactly one connection alive for its whole lifetime.
    let options = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = options.connect(&config.url).await?;

    tracing::info!("SQLite connection established at {}", config.url);

    Ok(pool)
}

pub async fn check_health(repository: &dyn ProductRepository) -> Result<()> {
    repository.ping().await
}
