//! SQLite pool lifecycle and record-type registration.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::model::Book;
use crate::service::RecordStore;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Opens the pool described by `config`, creating the database file if missing.
/// Call once at startup; close the pool at shutdown.
pub async fn connect(config: &AppConfig) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(opts)
        .await?;
    tracing::info!(
        url = %config.database_url,
        max_connections = config.max_connections,
        "database opened"
    );
    Ok(pool)
}

/// Private in-memory database. A single connection that never expires, since each
/// SQLite in-memory connection would otherwise see its own empty database.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Creates the table of every record type the API serves.
pub async fn register_tables(store: &RecordStore) -> Result<(), AppError> {
    store.create_table::<Book>().await
}
