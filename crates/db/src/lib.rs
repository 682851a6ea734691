//! Storage layer: pool construction, typed models and repositories.
//!
//! The schema itself is owned by the managed Postgres backend; the
//! `migrations/` directory at the workspace root mirrors it so tests can
//! provision a disposable database with [`MIGRATOR`].

use sqlx::postgres::PgPoolOptions;

mod error;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Embedded copy of the store schema, used by tests and tooling.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Create a pool without touching the network. Connections are attempted on
/// first use, so an unreachable store surfaces per query instead of at
/// construction. Used by tests that exercise the degraded-store paths.
pub fn create_pool_lazy(database_url: &str) -> Result<DbPool, sqlx::Error> {
    Ok(PgPoolOptions::new()
        .max_connections(2)
        .connect_lazy(database_url)?)
}

/// Verify the store answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
