use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Could not create items table: {0}")]
    Schema(#[source] sqlx::Error),
}

const CREATE_ITEMS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        name  TEXT,
        price REAL,
        sold  BOOLEAN
    )
"#;

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Opens a pool for `config.database_url`.
///
/// An in-memory database exists per connection, so for those URLs the pool is
/// pinned to one connection that is never recycled.
pub async fn get_db_pool(config: &Config) -> Result<SqlitePool, DbError> {
    connect(&config.database_url, config.max_connections).await
}

pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, DbError> {
    let mut options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let mut pool_options = SqlitePoolOptions::new();

    if is_in_memory(database_url) {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    } else {
        options = options.journal_mode(SqliteJournalMode::Wal);
        pool_options = pool_options.max_connections(max_connections);
    }

    let pool = pool_options.connect_with(options).await?;
    tracing::debug!(url = %database_url, "database pool opened");
    Ok(pool)
}

/// Creates the `items` table when it does not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query(CREATE_ITEMS_TABLE)
        .execute(pool)
        .await
        .map_err(DbError::Schema)?;
    Ok(())
}

/// Test fixture: a fresh in-memory database with the schema in place.
///
/// Public so the integration tests under `tests/` can share it. Production
/// code opens its pool through [`get_db_pool`].
pub async fn memory_pool() -> Result<SqlitePool, DbError> {
    let pool = connect("sqlite::memory:", 1).await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}
