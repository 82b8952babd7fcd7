/// Access token storage tests
use chrono::{Duration, Utc};
use warden_core::{NewToken, Storage, User, WardenError};
use warden_storage::Database;

async fn memory_db() -> Database {
    Database::new("sqlite::memory:").await.unwrap()
}

async fn seed_user(db: &Database, email: &str) -> User {
    db.create_user("Test User", email, "hash").await.unwrap()
}

fn new_token(user: &User, secret_hash: &str) -> NewToken {
    NewToken {
        user_id: user.id,
        name: "api".to_string(),
        secret_hash: secret_hash.to_string(),
        abilities: vec!["*".to_string()],
        expires_at: Some(Utc::now() + Duration::days(7)),
    }
}

#[tokio::test]
async fn token_round_trips() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice@example.com").await;

    let id = db.create_token(new_token(&user, "digest")).await.unwrap();
    let stored = db.get_token(id).await.unwrap();

    assert_eq!(stored.id, id);
    assert_eq!(stored.user_id, user.id);
    assert_eq!(stored.name, "api");
    assert_eq!(stored.secret_hash, "digest");
    assert_eq!(stored.abilities, vec!["*".to_string()]);
    assert!(stored.expires_at.is_some());
}

#[tokio::test]
async fn ability_list_round_trips() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice@example.com").await;

    let token = NewToken {
        abilities: vec!["profile:read".to_string(), "logout".to_string()],
        ..new_token(&user, "digest")
    };

    let id = db.create_token(token).await.unwrap();
    let stored = db.get_token(id).await.unwrap();

    assert!(stored.can("profile:read"));
    assert!(stored.can("logout"));
    assert!(!stored.can("admin"));
}

#[tokio::test]
async fn non_expiring_token_round_trips() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice@example.com").await;

    let token = NewToken {
        expires_at: None,
        ..new_token(&user, "digest")
    };

    let id = db.create_token(token).await.unwrap();
    let stored = db.get_token(id).await.unwrap();

    assert_eq!(stored.expires_at, None);
    assert!(!stored.is_expired(Utc::now()));
}

#[tokio::test]
async fn delete_user_tokens_removes_every_session() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice@example.com").await;

    let first = db.create_token(new_token(&user, "digest-1")).await.unwrap();
    let second = db.create_token(new_token(&user, "digest-2")).await.unwrap();

    let deleted = db.delete_user_tokens(user.id).await.unwrap();
    assert_eq!(deleted, 2);

    for id in [first, second] {
        let err = db.get_token(id).await.unwrap_err();
        assert!(matches!(err, WardenError::NotFound { .. }), "got {err:?}");
    }
}

#[tokio::test]
async fn delete_user_tokens_leaves_other_users_alone() {
    let db = memory_db().await;
    let alice = seed_user(&db, "alice@example.com").await;
    let bob = seed_user(&db, "bob@example.com").await;

    db.create_token(new_token(&alice, "digest-a")).await.unwrap();
    let bobs = db.create_token(new_token(&bob, "digest-b")).await.unwrap();

    let deleted = db.delete_user_tokens(alice.id).await.unwrap();
    assert_eq!(deleted, 1);

    assert!(db.get_token(bobs).await.is_ok());
}

#[tokio::test]
async fn delete_with_no_tokens_is_a_no_op() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice@example.com").await;

    let deleted = db.delete_user_tokens(user.id).await.unwrap();
    assert_eq!(deleted, 0);
}
