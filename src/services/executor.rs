//! Generic transaction wrapper for domain operations.

use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::CoreError;

/// Run `op` inside a transaction: commit if it returns `Ok`, roll back
/// otherwise.
///
/// Exactly one of commit/rollback happens per invocation. The operation's
/// error is propagated untouched. An abort that unwinds out of the operation
/// body leaves the transaction handle to roll back on drop, so no path leaves
/// a transaction open.
pub async fn with_transaction<R, F>(pool: &PgPool, op: F) -> Result<R, CoreError>
where
    F: for<'t> FnOnce(
        &'t mut Transaction<'static, Postgres>,
    ) -> BoxFuture<'t, Result<R, CoreError>>,
{
    let mut tx = pool.begin().await.map_err(CoreError::Connection)?;

    match op(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            // Roll back eagerly so row locks are released now rather than
            // when the handle drops. The operation error still wins.
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
