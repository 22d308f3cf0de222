//! Account and profile routes

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{auth, user};
use crate::state::AppState;

/// Create account and profile routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/register", post(auth::register))
        .route("/api/users/login", post(auth::login))
        .route("/api/users/oauth", post(auth::oauth_login))
        .route("/api/users/signout", post(auth::sign_out))
        .route("/api/users/me", get(user::get_user_details))
        .route("/api/users/profile", put(user::update_profile))
        .route("/api/users/achievements", get(user::get_achievements))
}
