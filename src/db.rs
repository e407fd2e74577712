//! Database connection pool management

use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Settings;

/// Create a SQLite connection pool; the database file is created if missing.
///
/// WAL lets readers run alongside the single writer, and writers that find
/// the lock taken wait up to the busy timeout before giving up.
pub async fn create_pool(settings: &Settings) -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str(&settings.database_url)
        .context("Invalid DATABASE_URL")?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(settings.database_busy_timeout_secs));

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.database_max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(connect_options)
        .await
        .context("Failed to open SQLite database")?;

    tracing::info!(
        max_connections = settings.database_max_connections,
        busy_timeout_secs = settings.database_busy_timeout_secs,
        "Database connection pool established"
    );

    Ok(pool)
}

/// Create the bid tables if they do not exist yet
pub async fn init_db(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database schema is up to date");
    Ok(())
}

/// Private in-memory database with the schema applied.
///
/// Held on a single connection that never expires, since every new
/// in-memory connection would see an empty database.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
        .context("Invalid in-memory database URL")?
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(connect_options)
        .await
        .context("Failed to open in-memory database")?;

    init_db(&pool).await?;
    Ok(pool)
}

/// Lightweight health check for database connectivity
pub async fn health_check(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
}
