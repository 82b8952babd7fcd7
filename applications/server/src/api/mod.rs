/// API route modules
pub mod account;
pub mod auth;
pub mod health;
