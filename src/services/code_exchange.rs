//! Authorization-code exchange: the single-use, replay-proof credential swap.

use sqlx::PgPool;
use uuid::Uuid;

use super::audit::{self, actions};
use super::executor::with_transaction;
use crate::error::CoreError;
use crate::models::AuthorizationCode;

#[derive(Clone)]
pub struct CodeExchanger {
    pool: PgPool,
}

impl CodeExchanger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Exchange `code` issued to `client_id` for the user it identifies.
    ///
    /// Returns `Ok(None)` for unknown, already-used, and expired codes alike;
    /// the caller cannot tell which failure occurred. At most one concurrent
    /// caller ever receives `Some`: the `FOR UPDATE` lock serializes
    /// contenders, the winner flips `used` before committing, and every later
    /// contender re-reads the burnt row under the lock and gets `None`. Lock
    /// wait timeouts and deadlocks surface as
    /// [`CoreError::ConcurrencyConflict`], distinct from `None`.
    pub async fn exchange(
        &self,
        code: &str,
        client_id: Uuid,
    ) -> Result<Option<Uuid>, CoreError> {
        let code = code.to_string();
        with_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                // No matching row: no lock taken, no audit entry, the
                // transaction closes cleanly.
                let row: Option<AuthorizationCode> = sqlx::query_as(
                    r#"
                    SELECT code, client_id, user_id, expires_at, used
                    FROM authorization_codes
                    WHERE code = $1 AND client_id = $2
                    FOR UPDATE
                    "#,
                )
                .bind(&code)
                .bind(client_id)
                .fetch_optional(&mut **tx)
                .await?;

                let Some(auth_code) = row else {
                    return Ok(None);
                };

                // Checked under the lock: there is no window between this
                // check and the burn below for another exchange to slip
                // through.
                if !auth_code.is_exchangeable() {
                    return Ok(None);
                }

                sqlx::query("UPDATE authorization_codes SET used = TRUE WHERE code = $1")
                    .bind(&code)
                    .execute(&mut **tx)
                    .await?;

                audit::record(
                    tx,
                    Some(auth_code.user_id),
                    actions::EXCHANGE_AUTHORIZATION_CODE,
                    "Code successfully exchanged for user identity.".to_string(),
                )
                .await?;

                Ok(Some(auth_code.user_id))
            })
        })
        .await
    }
}
