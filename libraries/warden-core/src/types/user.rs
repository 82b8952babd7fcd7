/// User domain type
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// User account
///
/// The password hash is intentionally not part of this type; it lives in a
/// separate credentials record and never crosses the serialization boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Email address (unique)
    pub email: String,

    /// Account creation timestamp (ISO string)
    pub created_at: String,
}
