//! Audit log model.
//!
//! Append-only: the core exposes no update or delete path for these rows.
//! `user_id` is null for client-scoped events.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct AuditLogEntry {
    pub id: i64,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub details: Option<String>,
}
