/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
    validate::Validator,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use warden_core::Storage;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub status: bool,
    pub message: String,
    pub token: String,
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let mut validator = Validator::new();
    validator
        .required("name", &req.name)
        .required("email", &req.email)
        .email("email", &req.email)
        .required("password", &req.password);

    // Uniqueness probe only once the email is shaped well enough to look up
    if validator.field_passes("email")
        && state.db.find_user_by_email(&req.email).await?.is_some()
    {
        validator.add_error("email", "The email has already been taken.");
    }

    validator.finish()?;

    // The password crosses this boundary only as a hash
    let password_hash = state.auth.hash_password(&req.password)?;
    let user = state
        .db
        .create_user(&req.name, &req.email, &password_hash)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    let token = state.auth.issue_token(&state.db, user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            status: true,
            message: "User created successfully".to_string(),
            token,
        }),
    ))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let mut validator = Validator::new();
    validator
        .required("email", &req.email)
        .email("email", &req.email)
        .required("password", &req.password);
    validator.finish()?;

    // Unknown email and wrong password answer identically so callers
    // cannot probe which accounts exist
    let user = state
        .db
        .find_user_by_email(&req.email)
        .await?
        .ok_or(ServerError::InvalidCredentials)?;

    let password_hash = state.db.get_password_hash(user.id).await?;
    if !state.auth.verify_password(&req.password, &password_hash)? {
        return Err(ServerError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, "user logged in");

    // Prior tokens stay live; concurrent sessions are allowed
    let token = state.auth.issue_token(&state.db, user.id).await?;

    Ok(Json(TokenResponse {
        status: true,
        message: "User logged in successfully".to_string(),
        token,
    }))
}
