//! Integration tests for the session repository.

mod common;

use chrono::{Duration, Utc};

use adboard_db::SessionRepository;

#[tokio::test]
async fn test_create_and_find_valid_session() {
    let db = common::setup_db().await;
    let repo = SessionRepository::new(db);

    repo.create("token-a", Utc::now() + Duration::hours(1))
        .await
        .expect("create session");

    let found = repo.find_valid("token-a").await.expect("lookup");
    assert!(found.is_some());

    let missing = repo.find_valid("token-b").await.expect("lookup");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_revoked_session_is_invalid() {
    let db = common::setup_db().await;
    let repo = SessionRepository::new(db);

    repo.create("token-a", Utc::now() + Duration::hours(1))
        .await
        .expect("create session");

    assert!(repo.revoke_by_token("token-a").await.expect("revoke"));
    assert!(repo.find_valid("token-a").await.expect("lookup").is_none());
    // Revoking again is a no-op.
    assert!(!repo.revoke_by_token("token-a").await.expect("revoke"));
}

#[tokio::test]
async fn test_expired_session_is_invalid_and_cleanable() {
    let db = common::setup_db().await;
    let repo = SessionRepository::new(db);

    repo.create("stale", Utc::now() - Duration::hours(1))
        .await
        .expect("create expired session");

    assert!(repo.find_valid("stale").await.expect("lookup").is_none());
    assert_eq!(repo.cleanup_expired().await.expect("cleanup"), 1);
}
