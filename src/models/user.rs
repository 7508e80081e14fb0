//! User model — soft-deleted identity records.
//!
//! Users are never physically removed by domain operations; archiving sets
//! `deleted_at` and flips the status to `deleted`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
    Deleted,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
            UserStatus::Deleted => "deleted",
        }
    }
}

/// User entity.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_archived(&self) -> bool {
        self.deleted_at.is_some() || self.status == UserStatus::Deleted.as_str()
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active.as_str() && self.deleted_at.is_none()
    }
}

/// Parameters for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Convenience constructor for the common case of a fresh id.
    pub fn new(username: impl Into<String>, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            first_name: None,
            middle_name: None,
            last_name: None,
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archived_user_is_not_active() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            first_name: None,
            middle_name: None,
            last_name: None,
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            status: UserStatus::Deleted.as_str().to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: Some(Utc::now()),
        };
        assert!(user.is_archived());
        assert!(!user.is_active());
    }
}
