//! Authentication HTTP handlers
//!
//! Registration, credential login, OAuth-style login and sign-out. Each
//! success issues (or clears) the session cookie alongside the JSON body.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::auth::session::{clear_session_cookie, session_cookie};
use crate::error::ApiError;
use crate::models::{
    AuthResponse, LoginRequest, MessageResponse, OAuthLoginRequest, RegisterRequest, UserSummary,
};
use crate::state::AppState;

/// POST /api/users/register - Create an account and start a session
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let user = state
        .account_service
        .register(&req.email, &req.password, &req.name, &req.address, &req.phone)
        .await?;

    let ttl = state.account_service.register_token_ttl();
    let token = state.account_service.issue_session_token(user.id, ttl)?;
    let cookie =
        session_cookie(&token, ttl).map_err(|e| ApiError::InternalError(e.to_string()))?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: UserSummary::from(&user),
        }),
    ))
}

/// POST /api/users/login - Authenticate with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let user = state.account_service.login(&req.email, &req.password).await?;

    let ttl = state.account_service.session_token_ttl();
    let token = state.account_service.issue_session_token(user.id, ttl)?;
    let cookie =
        session_cookie(&token, ttl).map_err(|e| ApiError::InternalError(e.to_string()))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "Logged in successfully".to_string(),
            user: UserSummary::from(&user),
        }),
    ))
}

/// POST /api/users/oauth - Find-or-create login for an upstream-verified identity
pub async fn oauth_login(
    State(state): State<AppState>,
    Json(req): Json<OAuthLoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let (user, created) = state
        .account_service
        .oauth_login(&req.name, &req.email)
        .await?;

    let ttl = state.account_service.oauth_token_ttl();
    let token = state.account_service.issue_session_token(user.id, ttl)?;
    let cookie =
        session_cookie(&token, ttl).map_err(|e| ApiError::InternalError(e.to_string()))?;

    let (status, message) = if created {
        tracing::info!(user_id = %user.id, "User registered via OAuth");
        (StatusCode::CREATED, "User registered successfully")
    } else {
        tracing::info!(user_id = %user.id, "User logged in via OAuth");
        (StatusCode::OK, "Logged in successfully")
    };

    Ok((
        status,
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: message.to_string(),
            user: UserSummary::from(&user),
        }),
    ))
}

/// POST /api/users/signout - Clear the session cookie
///
/// Always succeeds, regardless of prior authentication state.
pub async fn sign_out() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(SET_COOKIE, clear_session_cookie())],
        Json(MessageResponse {
            message: "Signed out successfully".to_string(),
        }),
    )
}
