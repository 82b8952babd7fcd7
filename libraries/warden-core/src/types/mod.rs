/// Domain types for Warden entities
mod ids;
mod token;
mod user;

pub use ids::{TokenId, UserId};
pub use token::{NewToken, StoredToken, WILDCARD_ABILITY};
pub use user::User;
