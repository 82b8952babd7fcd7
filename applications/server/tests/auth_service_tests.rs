/// Authentication service tests
/// Tests password hashing, token issuance, and token verification
mod common;

use chrono::{Duration, Utc};
use common::{create_test_database, fixtures};
use warden_core::{NewToken, Storage, User};
use warden_server::services::auth::{secret_digest, AuthService};
use warden_server::ServerError;
use warden_storage::Database;

/// Test password hashing produces valid bcrypt hashes
#[tokio::test]
async fn test_password_hashing() {
    let auth = create_test_auth_service();

    let hash = auth.hash_password(fixtures::TEST_PASSWORD).unwrap();

    // Verify hash format (bcrypt starts with $2b$ or $2a$)
    assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$"));
    assert!(hash.len() > 50);

    // Verify the hash is different each time (salt is random)
    let hash2 = auth.hash_password(fixtures::TEST_PASSWORD).unwrap();
    assert_ne!(hash, hash2, "Hashes should differ due to random salt");
}

/// Test password verification with correct and wrong passwords
#[tokio::test]
async fn test_password_verification() {
    let auth = create_test_auth_service();

    let hash = auth.hash_password(fixtures::TEST_PASSWORD).unwrap();

    assert!(auth.verify_password(fixtures::TEST_PASSWORD, &hash).unwrap());
    assert!(!auth.verify_password("WrongPassword", &hash).unwrap());
}

/// Test password verification with invalid hash format
#[tokio::test]
async fn test_password_verification_invalid_hash() {
    let auth = create_test_auth_service();

    let result = auth.verify_password("password", "not-a-valid-hash");
    assert!(result.is_err(), "Invalid hash should return error");
}

/// Test token issuance and verification round trip
#[tokio::test]
async fn test_token_issuance_and_verification() {
    let db = create_test_database().await.unwrap();
    let auth = create_test_auth_service();
    let user = seed_user(&db).await;

    let token = auth.issue_token(&db, user.id).await.unwrap();
    assert!(!token.is_empty(), "Token should not be empty");
    assert!(token.contains('|'), "Token should carry its store id prefix");

    let verified = auth.verify_token(&db, &token).await.unwrap();
    assert_eq!(verified, user.id, "Verified user ID should match original");
}

/// Test each issued token is distinct
#[tokio::test]
async fn test_issued_tokens_are_unique() {
    let db = create_test_database().await.unwrap();
    let auth = create_test_auth_service();
    let user = seed_user(&db).await;

    let first = auth.issue_token(&db, user.id).await.unwrap();
    let second = auth.issue_token(&db, user.id).await.unwrap();

    assert_ne!(first, second);

    // Both remain valid; issuing does not revoke
    assert!(auth.verify_token(&db, &first).await.is_ok());
    assert!(auth.verify_token(&db, &second).await.is_ok());
}

/// Test verification rejects a tampered secret
#[tokio::test]
async fn test_token_verification_wrong_secret() {
    let db = create_test_database().await.unwrap();
    let auth = create_test_auth_service();
    let user = seed_user(&db).await;

    let token = auth.issue_token(&db, user.id).await.unwrap();
    let (id, _) = token.split_once('|').unwrap();
    let forged = format!("{id}|AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");

    let result = auth.verify_token(&db, &forged).await;
    assert!(is_unauthorized(&result), "got {result:?}");
}

/// Test verification rejects malformed tokens
#[tokio::test]
async fn test_token_verification_malformed() {
    let db = create_test_database().await.unwrap();
    let auth = create_test_auth_service();

    for token in ["", "no-separator", "abc|secret", "999|"] {
        let result = auth.verify_token(&db, token).await;
        assert!(is_unauthorized(&result), "token {token:?} got {result:?}");
    }
}

/// Test verification rejects an unknown token id
#[tokio::test]
async fn test_token_verification_unknown_id() {
    let db = create_test_database().await.unwrap();
    let auth = create_test_auth_service();

    let result = auth.verify_token(&db, "12345|somesecretvalue").await;
    assert!(is_unauthorized(&result), "got {result:?}");
}

/// Test an expired token is rejected even with the right secret
#[tokio::test]
async fn test_expired_token_is_rejected() {
    let db = create_test_database().await.unwrap();
    let auth = create_test_auth_service();
    let user = seed_user(&db).await;

    // Store a token that expired an hour ago
    let token_id = db
        .create_token(NewToken {
            user_id: user.id,
            name: "api".to_string(),
            secret_hash: secret_digest("stale-secret"),
            abilities: vec!["*".to_string()],
            expires_at: Some(Utc::now() - Duration::hours(1)),
        })
        .await
        .unwrap();

    let result = auth.verify_token(&db, &format!("{token_id}|stale-secret")).await;
    assert!(is_unauthorized(&result), "got {result:?}");
}

/// Test revocation invalidates previously verified tokens
#[tokio::test]
async fn test_revocation_invalidates_tokens() {
    let db = create_test_database().await.unwrap();
    let auth = create_test_auth_service();
    let user = seed_user(&db).await;

    let first = auth.issue_token(&db, user.id).await.unwrap();
    let second = auth.issue_token(&db, user.id).await.unwrap();

    db.delete_user_tokens(user.id).await.unwrap();

    for token in [first, second] {
        let result = auth.verify_token(&db, &token).await;
        assert!(is_unauthorized(&result), "got {result:?}");
    }
}

// Helper functions

fn create_test_auth_service() -> AuthService {
    AuthService::new(7, vec!["*".to_string()])
}

async fn seed_user(db: &Database) -> User {
    db.create_user(fixtures::TEST_NAME, fixtures::TEST_EMAIL, "hash")
        .await
        .unwrap()
}

fn is_unauthorized<T: std::fmt::Debug>(result: &Result<T, ServerError>) -> bool {
    matches!(result, Err(ServerError::Unauthorized(_)))
}
