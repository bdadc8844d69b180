//! # Embedded Schema
//!
//! The store needs a single table, so the schema is embedded as SQL and
//! applied idempotently on connect. `PRAGMA user_version` records which
//! schema revision a file has seen.
//!
//! ```text
//!   connect ──► user_version < SCHEMA_VERSION ? ──yes──► apply SCHEMA, bump version
//!                              │
//!                              no ──► nothing to do
//! ```
//!
//! ## Adding New Revisions
//! Append statements, bump [`SCHEMA_VERSION`], and keep every statement
//! safe to re-run (`IF NOT EXISTS`).

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Current schema revision.
pub const SCHEMA_VERSION: i64 = 1;

/// Statements for revision 1.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS kv_store (
        key        TEXT PRIMARY KEY NOT NULL,
        value      TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
];

/// Applies the embedded schema if the file is behind.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    let current = schema_version(pool).await?;
    if current >= SCHEMA_VERSION {
        debug!(version = current, "Schema up to date");
        return Ok(());
    }

    info!(from = current, to = SCHEMA_VERSION, "Applying storage schema");

    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| StoreError::SchemaFailed(e.to_string()))?;
    }

    // PRAGMA does not accept bound parameters
    sqlx::query(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))
        .execute(pool)
        .await
        .map_err(|e| StoreError::SchemaFailed(e.to_string()))?;

    Ok(())
}

/// Schema revision recorded in the database file.
pub async fn schema_version(pool: &SqlitePool) -> StoreResult<i64> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;
    Ok(version)
}
