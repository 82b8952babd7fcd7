/// Authentication service - password hashing and opaque token handling
use crate::error::{Result, ServerError};
use chrono::{DateTime, Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};
use warden_core::{NewToken, Storage, TokenId, UserId};
use warden_storage::Database;

/// Label stored with every token issued over the API
const TOKEN_NAME: &str = "api";

/// Length of the random secret part of a bearer token
const SECRET_LEN: usize = 40;

#[derive(Debug, Clone)]
pub struct AuthService {
    token_expiry: Option<Duration>,
    token_abilities: Vec<String>,
}

impl AuthService {
    /// Create the service; `token_expiry_days == 0` issues non-expiring
    /// tokens
    pub fn new(token_expiry_days: u64, token_abilities: Vec<String>) -> Self {
        let token_expiry = if token_expiry_days == 0 {
            None
        } else {
            Some(Duration::days(token_expiry_days as i64))
        };

        Self {
            token_expiry,
            token_abilities,
        }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Expiry instant for a token issued now
    pub fn token_expiry(&self) -> Option<DateTime<Utc>> {
        self.token_expiry.map(|d| Utc::now() + d)
    }

    /// Issue a new bearer token for the user and return its plain-text form
    ///
    /// The store keeps only the digest; the returned string is the single
    /// copy of the secret.
    pub async fn issue_token(&self, db: &Database, user_id: UserId) -> Result<String> {
        let secret = generate_secret();

        let token_id = db
            .create_token(NewToken {
                user_id,
                name: TOKEN_NAME.to_string(),
                secret_hash: secret_digest(&secret),
                abilities: self.token_abilities.clone(),
                expires_at: self.token_expiry(),
            })
            .await?;

        Ok(compose_token(token_id, &secret))
    }

    /// Verify a presented bearer token, returning the owning user
    pub async fn verify_token(&self, db: &Database, token: &str) -> Result<UserId> {
        let (token_id, secret) =
            parse_token(token).ok_or_else(|| ServerError::Unauthorized("Invalid token".into()))?;

        let stored = db
            .get_token(token_id)
            .await
            .map_err(|_| ServerError::Unauthorized("Invalid token".into()))?;

        if stored.secret_hash != secret_digest(secret) {
            return Err(ServerError::Unauthorized("Invalid token".into()));
        }

        if stored.is_expired(Utc::now()) {
            return Err(ServerError::Unauthorized("Token expired".into()));
        }

        Ok(stored.user_id)
    }
}

/// Random alphanumeric token secret
fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_LEN)
        .map(char::from)
        .collect()
}

/// Hex-encoded SHA-256 digest of a token secret
pub fn secret_digest(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

/// Client-visible token form: the store id followed by the secret
fn compose_token(id: TokenId, secret: &str) -> String {
    format!("{}|{}", id, secret)
}

/// Split a presented token back into id and secret
fn parse_token(token: &str) -> Option<(TokenId, &str)> {
    let (id, secret) = token.split_once('|')?;
    let id = id.parse::<i64>().ok()?;
    if secret.is_empty() {
        return None;
    }
    Some((TokenId::new(id), secret))
}
