//! Authorization code model.
//!
//! Single-use by construction: `issued -> used` via a successful exchange, or
//! `issued -> expired` once `expires_at` passes (detected lazily at exchange
//! time). Neither transition is ever reversed.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct AuthorizationCode {
    pub code: String,
    pub client_id: Uuid,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
}

impl AuthorizationCode {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Valid for exchange: unused and unexpired. Only meaningful when the row
    /// is held under a lock inside the exchanging transaction.
    pub fn is_exchangeable(&self) -> bool {
        !self.used && !self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn code(used: bool, expires_in: Duration) -> AuthorizationCode {
        AuthorizationCode {
            code: "abc123".to_string(),
            client_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            expires_at: Utc::now() + expires_in,
            used,
        }
    }

    #[test]
    fn fresh_code_is_exchangeable() {
        assert!(code(false, Duration::minutes(5)).is_exchangeable());
    }

    #[test]
    fn used_or_expired_code_is_not_exchangeable() {
        assert!(!code(true, Duration::minutes(5)).is_exchangeable());
        assert!(!code(false, Duration::minutes(-5)).is_exchangeable());
    }
}
