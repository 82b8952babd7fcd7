//! Warden Core
//!
//! Domain types, traits, and error handling for the Warden authentication
//! service.
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `UserId`, `TokenId`, `NewToken`, `StoredToken`
//! - **Storage Trait**: the persistence seam implemented by `warden-storage`
//! - **Error Handling**: unified `WardenError` and `Result` types

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{Result, WardenError};
pub use storage::Storage;
pub use types::{NewToken, StoredToken, TokenId, User, UserId};
