//! Schema and operation bring-up.
//!
//! Runs once, single-writer, before any service traffic is accepted; the
//! process exits after it completes or fails.

mod catalog;

pub use catalog::{Migration, OPERATION_CATALOG, SCHEMA_CATALOG};

use crate::error::CoreError;
use sqlx::postgres::PgPool;

/// Advisory lock key serializing competing bring-up runs.
const MIGRATION_LOCK_KEY: i64 = 0x756e69666163;

/// Apply the schema catalog followed by the operation catalog, in order,
/// inside a single all-or-nothing transaction.
///
/// On any entry failure the whole batch rolls back; no partial schema or
/// partial operation set is ever committed. Repeated runs against an
/// already-migrated database are no-ops.
pub async fn apply(
    pool: &PgPool,
    schema: &[Migration],
    operations: &[Migration],
) -> Result<(), CoreError> {
    let mut tx = pool.begin().await.map_err(CoreError::Connection)?;

    // Held until commit/rollback; a second runner blocks here instead of
    // tripping over half-created objects.
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    for migration in schema.iter().chain(operations) {
        tracing::info!(name = migration.name, "Executing migration");
        sqlx::raw_sql(migration.sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| CoreError::Migration {
                name: migration.name.to_string(),
                source: e,
            })?;
    }

    tx.commit().await?;
    Ok(())
}
