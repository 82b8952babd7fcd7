/// Storage trait
use crate::error::Result;
use crate::types::{NewToken, StoredToken, TokenId, User, UserId};

/// Persistence seam for the authentication handlers
///
/// Implementers provide the operations the handlers compose: user records,
/// password credentials, and access tokens.
#[allow(async_fn_in_trait)]
pub trait Storage: Send + Sync {
    // User operations

    /// Create a new user with a pre-hashed password
    ///
    /// The user row and its credential row are written atomically. Fails
    /// with a duplicate error if the email is already taken.
    async fn create_user(&self, name: &str, email: &str, password_hash: &str) -> Result<User>;

    /// Get a user by ID
    async fn get_user(&self, id: UserId) -> Result<User>;

    /// Look up a user by email, if one exists
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Get all users
    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// Get a user's password hash
    async fn get_password_hash(&self, id: UserId) -> Result<String>;

    // Token operations

    /// Persist a new access token, returning its assigned id
    async fn create_token(&self, token: NewToken) -> Result<TokenId>;

    /// Get a token by ID
    async fn get_token(&self, id: TokenId) -> Result<StoredToken>;

    /// Delete every token owned by a user, returning how many were removed
    async fn delete_user_tokens(&self, user_id: UserId) -> Result<u64>;
}
