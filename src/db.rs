//! Database pool construction and schema bootstrap.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// DDL for all tables, applied by the `init_db` binary.
pub const SCHEMA_SQL: &str = include_str!("../schema.sql");

pub async fn connect(database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("failed to connect to Postgres")
}

/// Refuse to serve against an uninitialized database.
///
/// The schema is applied out-of-band by `init_db`; a missing table here is an
/// operator error, not something to retry.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    let present: Option<String> = sqlx::query_scalar("SELECT to_regclass('tariff_patches')::text")
        .fetch_one(pool)
        .await
        .context("checking for the tariff_patches table")?;

    if present.is_none() {
        bail!("database schema is missing; run the init_db binary first");
    }
    Ok(())
}

pub async fn apply_schema(pool: &PgPool) -> Result<()> {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await
        .context("applying schema.sql")?;
    Ok(())
}
