//! Client registration against a real database.

mod common;

use unified_access::error::CoreError;
use unified_access::models::NewClient;
use unified_access::services::audit::actions;
use unified_access::services::ClientOperations;
use uuid::Uuid;

#[tokio::test]
#[ignore] // Requires running PostgreSQL
async fn redirect_uris_come_back_in_registration_order() {
    let pool = common::setup_pool().await;
    let ops = ClientOperations::new(pool.clone());

    let uris = vec![
        "https://app.example.com/callback".to_string(),
        "https://app.example.com/alt".to_string(),
        "myapp://oauth/return".to_string(),
    ];
    let client = NewClient::new("Example App", "secret-hash", uris.clone());
    let client_id = client.id;

    ops.register_client(client).await.expect("register failed");

    assert_eq!(ops.redirect_uris(client_id).await.unwrap(), uris);
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL
async fn empty_redirect_set_is_valid() {
    let pool = common::setup_pool().await;
    let ops = ClientOperations::new(pool.clone());

    let client = NewClient::new("No Redirects", "secret-hash", Vec::new());
    let client_id = client.id;

    ops.register_client(client).await.expect("register failed");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients WHERE id = $1")
        .bind(client_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert!(ops.redirect_uris(client_id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL
async fn registration_audits_as_a_client_level_event() {
    let pool = common::setup_pool().await;
    let ops = ClientOperations::new(pool.clone());

    let client = NewClient::new("Audited App", "secret-hash", Vec::new());
    let client_id = client.id;
    ops.register_client(client).await.expect("register failed");

    // user_id is null: this event is not tied to an end user.
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM audit_logs WHERE action = $1 AND user_id IS NULL AND details LIKE $2",
    )
    .bind(actions::REGISTER_CLIENT)
    .bind(format!("%{}%", client_id))
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL
async fn duplicate_client_id_rolls_back_uris_and_audit() {
    let pool = common::setup_pool().await;
    let ops = ClientOperations::new(pool.clone());

    let id = Uuid::new_v4();
    let first = NewClient {
        id,
        client_name: "First".to_string(),
        client_secret_hash: "hash".to_string(),
        redirect_uris: vec!["https://first.example.com/cb".to_string()],
    };
    ops.register_client(first).await.expect("register failed");

    let second = NewClient {
        id,
        client_name: "Second".to_string(),
        client_secret_hash: "hash".to_string(),
        redirect_uris: vec!["https://second.example.com/cb".to_string()],
    };
    let err = ops.register_client(second).await.unwrap_err();
    assert!(matches!(err, CoreError::ConstraintViolation(_)));

    // Only the first registration's rows survive.
    assert_eq!(
        ops.redirect_uris(id).await.unwrap(),
        vec!["https://first.example.com/cb".to_string()]
    );
}
