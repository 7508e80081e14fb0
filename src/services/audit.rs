//! Append-only audit log writer.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::error::CoreError;

/// Action names recorded by the domain operations.
pub mod actions {
    pub const CREATE_USER: &str = "create_user";
    pub const ARCHIVE_USER: &str = "archive_user";
    pub const UPDATE_USER_PASSWORD: &str = "update_user_password";
    pub const REGISTER_CLIENT: &str = "register_client";
    pub const EXCHANGE_AUTHORIZATION_CODE: &str = "exchange_authorization_code";
}

/// Insert one audit entry inside the caller's transaction, so the entry
/// commits or rolls back together with the operation that produced it.
///
/// `user_id` is `None` for client-scoped events.
pub async fn record(
    tx: &mut Transaction<'static, Postgres>,
    user_id: Option<Uuid>,
    action: &str,
    details: String,
) -> Result<(), CoreError> {
    sqlx::query("INSERT INTO audit_logs (user_id, action, details) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(action)
        .bind(details)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
