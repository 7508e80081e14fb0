//! Refresh token model.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub id: i64,
    pub token: String,
    pub client_id: Uuid,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl RefreshToken {
    /// Usable: not revoked and not past its expiry. Archiving a user or
    /// rotating a password expires every active token, so this goes false for
    /// all of that user's tokens in the same transaction.
    pub fn is_active(&self) -> bool {
        !self.revoked && self.expires_at > Utc::now()
    }
}
