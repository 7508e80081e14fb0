//! PostgreSQL connection management.
//!
//! Every domain operation runs through one bounded pool; the bounds cap
//! concurrent connections to protect the backing store. Timeouts live here,
//! not in the operations: callers enforce them at the pool layer.

use crate::config::DatabaseConfig;
use crate::error::CoreError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Create a bounded PostgreSQL connection pool.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, CoreError> {
    tracing::info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.url)
        .await
        .map_err(CoreError::Connection)?;

    tracing::info!("Successfully connected to PostgreSQL");

    Ok(pool)
}

/// Check database health.
pub async fn health_check(pool: &PgPool) -> Result<(), CoreError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(CoreError::Connection)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires running PostgreSQL
    async fn test_create_pool() {
        let config = DatabaseConfig {
            url: "postgres://localhost/unified_access_test".to_string(),
            max_connections: 5,
            min_connections: 1,
        };

        let result = create_pool(&config).await;
        assert!(result.is_ok());
    }
}
