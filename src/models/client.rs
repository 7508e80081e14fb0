//! Service-provider (client) models.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Registered service provider. `client_secret` holds a hash, never the
/// secret itself.
#[derive(Debug, Clone, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub client_name: String,
    pub client_secret: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// One allowed redirect URI of a client. Registration order is fixed by the
/// ascending `id`.
#[derive(Debug, Clone, FromRow)]
pub struct ClientUrl {
    pub id: i64,
    pub client_id: Uuid,
    pub redirect_url: String,
    pub created_at: DateTime<Utc>,
}

/// Parameters for registering a client. An empty redirect set is valid.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub id: Uuid,
    pub client_name: String,
    pub client_secret_hash: String,
    pub redirect_uris: Vec<String>,
}

impl NewClient {
    pub fn new(
        client_name: impl Into<String>,
        client_secret_hash: impl Into<String>,
        redirect_uris: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name: client_name.into(),
            client_secret_hash: client_secret_hash.into(),
            redirect_uris,
        }
    }
}
