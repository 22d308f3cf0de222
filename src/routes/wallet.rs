//! Wallet routes

use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers::wallet;
use crate::state::AppState;

/// Create wallet routes
pub fn wallet_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/wallet", put(wallet::update_wallet))
        .route("/api/users/wallet", get(wallet::get_wallets))
}
