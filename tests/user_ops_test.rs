//! User lifecycle operations against a real database.

mod common;

use chrono::Duration;
use unified_access::error::CoreError;
use unified_access::models::NewUser;
use unified_access::services::audit::actions;
use unified_access::services::UserOperations;
use uuid::Uuid;

#[tokio::test]
#[ignore] // Requires running PostgreSQL
async fn create_user_writes_row_and_audit_entry_together() {
    let pool = common::setup_pool().await;
    let ops = UserOperations::new(pool.clone());

    let user = NewUser::new(
        format!("alice_{}", Uuid::new_v4().simple()),
        format!("{}@example.com", Uuid::new_v4().simple()),
        "argon2-hash",
    );
    let user_id = user.id;

    ops.create_user(user).await.expect("create_user failed");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(
        common::count_audit_entries(&pool, actions::CREATE_USER, Some(user_id)).await,
        1
    );
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL
async fn duplicate_email_is_a_constraint_violation_with_zero_partial_writes() {
    let pool = common::setup_pool().await;
    let ops = UserOperations::new(pool.clone());

    let email = format!("{}@example.com", Uuid::new_v4().simple());
    let first = NewUser::new(format!("u{}", Uuid::new_v4().simple()), email.clone(), "hash");
    ops.create_user(first).await.expect("first create failed");

    let second = NewUser::new(format!("u{}", Uuid::new_v4().simple()), email.clone(), "hash");
    let second_id = second.id;
    let err = ops.create_user(second).await.unwrap_err();
    assert!(matches!(err, CoreError::ConstraintViolation(_)));

    // The rejected insert left nothing behind, audit entry included.
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(second_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
    assert_eq!(
        common::count_audit_entries(&pool, actions::CREATE_USER, Some(second_id)).await,
        0
    );
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL
async fn archive_user_expires_every_active_grant() {
    let pool = common::setup_pool().await;
    let ops = UserOperations::new(pool.clone());

    let user_id = common::seed_user(&pool).await;
    let client_id = common::seed_client(&pool).await;
    common::seed_refresh_token(&pool, client_id, user_id, Duration::days(7)).await;
    common::seed_refresh_token(&pool, client_id, user_id, Duration::days(1)).await;
    common::seed_authorization_code(&pool, client_id, user_id, Duration::minutes(10)).await;

    ops.archive_user(user_id).await.expect("archive failed");

    let (tokens, codes) = common::active_grant_counts(&pool, user_id).await;
    assert_eq!((tokens, codes), (0, 0));

    let deleted_at: Option<chrono::DateTime<chrono::Utc>> =
        common::fetch_user_field(&pool, user_id, "deleted_at").await;
    assert!(deleted_at.is_some());
    let status: String = common::fetch_user_field(&pool, user_id, "status").await;
    assert_eq!(status, "deleted");

    assert_eq!(
        common::count_audit_entries(&pool, actions::ARCHIVE_USER, Some(user_id)).await,
        1
    );
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL
async fn archiving_twice_is_rejected_without_disturbing_the_first_run() {
    let pool = common::setup_pool().await;
    let ops = UserOperations::new(pool.clone());

    let user_id = common::seed_user(&pool).await;
    ops.archive_user(user_id).await.expect("archive failed");
    let deleted_at: Option<chrono::DateTime<chrono::Utc>> =
        common::fetch_user_field(&pool, user_id, "deleted_at").await;

    let err = ops.archive_user(user_id).await.unwrap_err();
    assert!(matches!(err, CoreError::UserAlreadyArchived));

    // First call's effects unchanged: same timestamp, still one audit entry.
    let deleted_at_after: Option<chrono::DateTime<chrono::Utc>> =
        common::fetch_user_field(&pool, user_id, "deleted_at").await;
    assert_eq!(deleted_at, deleted_at_after);
    assert_eq!(
        common::count_audit_entries(&pool, actions::ARCHIVE_USER, Some(user_id)).await,
        1
    );
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL
async fn archiving_an_unknown_user_is_not_found() {
    let pool = common::setup_pool().await;
    let ops = UserOperations::new(pool.clone());

    let err = ops.archive_user(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, CoreError::UserNotFound));
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL
async fn password_update_rotates_hash_and_expires_grants() {
    let pool = common::setup_pool().await;
    let ops = UserOperations::new(pool.clone());

    let user_id = common::seed_user(&pool).await;
    let client_id = common::seed_client(&pool).await;
    common::seed_refresh_token(&pool, client_id, user_id, Duration::days(7)).await;
    common::seed_authorization_code(&pool, client_id, user_id, Duration::minutes(10)).await;

    ops.update_user_password(user_id, "new-hash".to_string())
        .await
        .expect("password update failed");

    let hash: String = common::fetch_user_field(&pool, user_id, "password_hash").await;
    assert_eq!(hash, "new-hash");

    let (tokens, codes) = common::active_grant_counts(&pool, user_id).await;
    assert_eq!((tokens, codes), (0, 0));

    assert_eq!(
        common::count_audit_entries(&pool, actions::UPDATE_USER_PASSWORD, Some(user_id)).await,
        1
    );
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL
async fn password_update_on_archived_user_is_rejected() {
    let pool = common::setup_pool().await;
    let ops = UserOperations::new(pool.clone());

    let user_id = common::seed_user(&pool).await;
    ops.archive_user(user_id).await.expect("archive failed");

    let err = ops
        .update_user_password(user_id, "new-hash".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::UserAlreadyArchived));
}
