//! User lifecycle operations: creation, archival, credential rotation.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::audit::{self, actions};
use super::executor::with_transaction;
use crate::error::CoreError;
use crate::models::{NewUser, UserStatus};

#[derive(Clone)]
pub struct UserOperations {
    pool: PgPool,
}

impl UserOperations {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one user row plus its audit entry. Both writes or neither.
    ///
    /// A username or email already held by a non-deleted user surfaces as
    /// [`CoreError::ConstraintViolation`].
    pub async fn create_user(&self, user: NewUser) -> Result<(), CoreError> {
        with_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                sqlx::query(
                    r#"
                    INSERT INTO users (id, username, first_name, middle_name, last_name, email, password_hash)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(user.id)
                .bind(&user.username)
                .bind(&user.first_name)
                .bind(&user.middle_name)
                .bind(&user.last_name)
                .bind(&user.email)
                .bind(&user.password_hash)
                .execute(&mut **tx)
                .await?;

                audit::record(
                    tx,
                    Some(user.id),
                    actions::CREATE_USER,
                    format!("User {} was created.", user.id),
                )
                .await?;

                Ok(())
            })
        })
        .await
    }

    /// Archive (soft-delete) a user and invalidate every outstanding grant.
    ///
    /// Atomically: sets `deleted_at`/status, expires all currently-active
    /// refresh tokens and authorization codes owned by the user, and writes
    /// one audit entry. Rejects unknown users with [`CoreError::UserNotFound`]
    /// and already-archived users with [`CoreError::UserAlreadyArchived`]; a
    /// repeated call never silently re-applies the transition.
    pub async fn archive_user(&self, user_id: Uuid) -> Result<(), CoreError> {
        with_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                let archived = sqlx::query(
                    r#"
                    UPDATE users
                    SET deleted_at = NOW(), status = $1, updated_at = NOW()
                    WHERE id = $2 AND deleted_at IS NULL
                    "#,
                )
                .bind(UserStatus::Deleted.as_str())
                .bind(user_id)
                .execute(&mut **tx)
                .await?;

                if archived.rows_affected() == 0 {
                    return Err(reject_missing_or_archived(tx, user_id).await?);
                }

                expire_user_grants(tx, user_id).await?;

                audit::record(
                    tx,
                    Some(user_id),
                    actions::ARCHIVE_USER,
                    format!("User {} was archived.", user_id),
                )
                .await?;

                Ok(())
            })
        })
        .await
    }

    /// Rotate a user's password hash and expire every active session/grant
    /// tied to the old credential, forcing re-authentication everywhere.
    pub async fn update_user_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), CoreError> {
        with_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                let updated = sqlx::query(
                    r#"
                    UPDATE users
                    SET password_hash = $1, updated_at = NOW()
                    WHERE id = $2 AND deleted_at IS NULL
                    "#,
                )
                .bind(&new_password_hash)
                .bind(user_id)
                .execute(&mut **tx)
                .await?;

                if updated.rows_affected() == 0 {
                    return Err(reject_missing_or_archived(tx, user_id).await?);
                }

                expire_user_grants(tx, user_id).await?;

                audit::record(
                    tx,
                    Some(user_id),
                    actions::UPDATE_USER_PASSWORD,
                    format!("User {} password was updated.", user_id),
                )
                .await?;

                Ok(())
            })
        })
        .await
    }
}

/// Expire every currently-active refresh token and authorization code owned
/// by the user, inside the caller's transaction.
async fn expire_user_grants(
    tx: &mut Transaction<'static, Postgres>,
    user_id: Uuid,
) -> Result<(), CoreError> {
    sqlx::query(
        "UPDATE refresh_tokens SET expires_at = NOW() WHERE user_id = $1 AND expires_at > NOW()",
    )
    .bind(user_id)
    .execute(&mut **tx)
    .await?;

    sqlx::query(
        "UPDATE authorization_codes SET expires_at = NOW() WHERE user_id = $1 AND expires_at > NOW()",
    )
    .bind(user_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Distinguish "no such user" from "already archived" after a guarded UPDATE
/// matched nothing.
async fn reject_missing_or_archived(
    tx: &mut Transaction<'static, Postgres>,
    user_id: Uuid,
) -> Result<CoreError, CoreError> {
    let row: Option<(bool,)> =
        sqlx::query_as("SELECT deleted_at IS NOT NULL FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await?;

    Ok(match row {
        Some(_) => CoreError::UserAlreadyArchived,
        None => CoreError::UserNotFound,
    })
}
