//! Service-provider (client) registration.

use sqlx::PgPool;
use uuid::Uuid;

use super::audit::{self, actions};
use super::executor::with_transaction;
use crate::error::CoreError;
use crate::models::NewClient;

#[derive(Clone)]
pub struct ClientOperations {
    pool: PgPool,
}

impl ClientOperations {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a client: one client row, one `client_urls` row per redirect
    /// URI in input order, and one audit entry with a null user id (this is a
    /// client-level event). All writes or none.
    ///
    /// An empty redirect set is valid and inserts zero URI rows. A duplicate
    /// client id surfaces as [`CoreError::ConstraintViolation`].
    pub async fn register_client(&self, client: NewClient) -> Result<(), CoreError> {
        with_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                sqlx::query(
                    "INSERT INTO clients (id, client_name, client_secret) VALUES ($1, $2, $3)",
                )
                .bind(client.id)
                .bind(&client.client_name)
                .bind(&client.client_secret_hash)
                .execute(&mut **tx)
                .await?;

                // Insertion order fixes retrieval order via the ascending id.
                for uri in &client.redirect_uris {
                    sqlx::query(
                        "INSERT INTO client_urls (client_id, redirect_url) VALUES ($1, $2)",
                    )
                    .bind(client.id)
                    .bind(uri)
                    .execute(&mut **tx)
                    .await?;
                }

                audit::record(
                    tx,
                    None,
                    actions::REGISTER_CLIENT,
                    format!("Client {} was registered.", client.id),
                )
                .await?;

                Ok(())
            })
        })
        .await
    }

    /// Redirect URIs of a client, in registration order.
    pub async fn redirect_uris(&self, client_id: Uuid) -> Result<Vec<String>, CoreError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT redirect_url FROM client_urls WHERE client_id = $1 ORDER BY id",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(uri,)| uri).collect())
    }
}
