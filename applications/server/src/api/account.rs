/// Authenticated account API routes
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, Json};
use serde::Serialize;
use warden_core::{Storage, User, UserId};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub status: bool,
    pub message: String,
    pub data: User,
    pub id: UserId,
}

/// GET /api/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<ProfileResponse>> {
    let user = state.db.get_user(auth.user_id()).await?;

    Ok(Json(ProfileResponse {
        status: true,
        message: "Profile information".to_string(),
        id: user.id,
        data: user,
    }))
}

/// GET /api/logout
///
/// Revokes every token the user owns, not just the presenting one.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    let removed = state.db.delete_user_tokens(auth.user_id()).await?;

    tracing::info!(user_id = %auth.user_id(), removed, "user logged out");

    Ok(Json(serde_json::json!({
        "status": true,
        "message": "User logged out",
        "data": [],
    })))
}
