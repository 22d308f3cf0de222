//! User profile HTTP handlers

use axum::{extract::State, Json};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::{Achievement, UpdateProfileRequest, UserResponse};
use crate::state::AppState;

/// GET /api/users/me - Echo the authenticated user
///
/// The session verifier already resolved the user record; no store call.
pub async fn get_user_details(auth: AuthenticatedUser) -> Json<UserResponse> {
    Json(auth.user.into())
}

/// PUT /api/users/profile - Update the caller's profile fields
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    req.validate()?;

    let user = state
        .account_service
        .update_profile(auth.user.id, &req.name, &req.address, &req.phone)
        .await?;

    Ok(Json(user.into()))
}

/// GET /api/users/achievements - List the caller's achievements
pub async fn get_achievements(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Achievement>>, ApiError> {
    let achievements = state.account_service.achievements_for(auth.user.id).await?;

    Ok(Json(achievements))
}
