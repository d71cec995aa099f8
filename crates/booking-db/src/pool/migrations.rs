//! Embedded schema migration

use sqlx::postgres::PgPool;
use tracing::info;

const INIT_SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

/// Apply the schema. Every statement is idempotent, so this runs on each start.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(INIT_SCHEMA).execute(pool).await?;
    info!("Database schema is up to date");
    Ok(())
}
