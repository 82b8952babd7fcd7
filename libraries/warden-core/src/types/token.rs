/// Access token domain types
use crate::types::{TokenId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The ability that grants every capability
pub const WILDCARD_ABILITY: &str = "*";

/// A token about to be persisted
///
/// The store assigns the id; the caller supplies everything else. Only the
/// SHA-256 digest of the secret is ever stored.
#[derive(Debug, Clone)]
pub struct NewToken {
    /// Owning user
    pub user_id: UserId,

    /// Token label (e.g. the issuing client)
    pub name: String,

    /// Hex-encoded SHA-256 digest of the secret
    pub secret_hash: String,

    /// Granted abilities; `["*"]` means unrestricted
    pub abilities: Vec<String>,

    /// Expiry instant, or `None` for a non-expiring token
    pub expires_at: Option<DateTime<Utc>>,
}

/// A token as persisted by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    /// Unique token identifier
    pub id: TokenId,

    /// Owning user
    pub user_id: UserId,

    /// Token label
    pub name: String,

    /// Hex-encoded SHA-256 digest of the secret
    pub secret_hash: String,

    /// Granted abilities
    pub abilities: Vec<String>,

    /// Expiry instant, if any
    pub expires_at: Option<DateTime<Utc>>,

    /// Issuance timestamp
    pub created_at: DateTime<Utc>,
}

impl StoredToken {
    /// Whether the token grants the given ability
    pub fn can(&self, ability: &str) -> bool {
        self.abilities
            .iter()
            .any(|a| a == WILDCARD_ABILITY || a == ability)
    }

    /// Whether the token has expired as of `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}
