//! PostgreSQL store adapter for the lead pipeline.
//!
//! Layout mirrors the split between raw rows and domain types:
//! [`models`] holds the `leads` table row shape, [`repositories`] the raw
//! sqlx queries, and [`store`] the [`leadpipe_core::store::LeadStore`]
//! implementation that the engines consume.

pub mod models;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// The connection pool type shared across the workspace.
pub type DbPool = PgPool;

/// Default connection pool size.
const MAX_CONNECTIONS: u32 = 10;

/// Create a connection pool for the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from the crate's `migrations/` directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
