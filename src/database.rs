//! Connection pool construction and schema management.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::Config;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS products (
        id BLOB PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        price REAL NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_products_created_at ON products (created_at)",
    "CREATE TABLE IF NOT EXISTS users (
        id BLOB PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )",
];

/// Opens a pool for `config.database_url`, creating the database file if needed.
///
/// A connection that finds the database locked by another writer waits up to the
/// request deadline before giving up.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .busy_timeout(config.request_timeout);

    SqlitePoolOptions::new()
        .acquire_timeout(config.request_timeout)
        .connect_with(options)
        .await
}

/// Opens a private in-memory database.
///
/// Every SQLite in-memory connection is its own database, so the pool is pinned to a
/// single connection that is never recycled.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(Duration::from_secs(5))
        .connect("sqlite::memory:")
        .await
}

/// Creates any missing tables and indexes.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Round-trips a trivial query to check the store is reachable.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
