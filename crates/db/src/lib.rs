//! Persistence layer: pool construction, migrations and repositories.
//!
//! Reads go straight to the pool. Writes take a `&mut DbConn`, which callers
//! obtain from [`DbPool::begin`] so every mutation runs inside a transaction
//! that rolls back when dropped uncommitted.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Connection type accepted by repository write methods. A
/// `sqlx::Transaction<'_, Sqlite>` derefs to it.
pub type DbConn = sqlx::SqliteConnection;

/// Transaction handle held by a request while it writes.
pub type DbTx = sqlx::Transaction<'static, sqlx::Sqlite>;

/// Create a connection pool from a database URL.
///
/// Foreign keys are always enforced. An in-memory URL (`sqlite::memory:`)
/// is pinned to a single connection that never expires, since each SQLite
/// memory connection is a separate database.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };

    pool_options.connect_with(options).await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
