/// ID types for Warden entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier
///
/// Numeric, assigned by the store at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Create a user ID from its numeric value
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Access token identifier
///
/// Numeric, assigned by the store at issuance time. The client-visible
/// bearer token embeds this id as its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(i64);

impl TokenId {
    /// Create a token ID from its numeric value
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
