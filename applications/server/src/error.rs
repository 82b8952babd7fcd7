/// Server error types
use crate::validate::ValidationErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use warden_core::WardenError;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("validation error")]
    Validation(ValidationErrors),

    #[error("Email & password does not match with our record")]
    InvalidCredentials,

    #[error("Authorization failed: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] WardenError),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        // Every body carries the uniform status/message pair so callers
        // have a single shape to branch on.
        let (status, body) = match self {
            ServerError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "status": false,
                    "message": "validation error",
                    "errors": errors,
                }),
            ),
            ServerError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "status": false,
                    "message": "Email & password does not match with our record",
                }),
            ),
            ServerError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "status": false,
                    "message": msg,
                }),
            ),
            // A missing record behind a valid token gets its own status;
            // everything else internal is logged and reported opaquely.
            ServerError::Core(WardenError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                json!({
                    "status": false,
                    "message": format!("{entity} not found: {id}"),
                }),
            ),
            ServerError::Core(ref e) => {
                tracing::error!("Core error: {:?}", e);
                let kind = match e {
                    WardenError::Duplicate(_) => "duplicate",
                    _ => "internal",
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "status": false,
                        "message": "Internal server error",
                        "error": kind,
                    }),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "status": false,
                        "message": "Configuration error",
                        "error": "config",
                    }),
                )
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "status": false,
                        "message": "Internal server error",
                        "error": "internal",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
