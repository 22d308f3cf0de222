//! Wallet HTTP handlers

use axum::{extract::State, Json};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::{UpdateWalletRequest, Wallet};
use crate::state::AppState;

/// PUT /api/users/wallet - Associate a wallet address with the caller
///
/// Upsert keyed by address; an address held by another user moves to the
/// caller. Store failures are caught here and answered with a generic 500.
pub async fn update_wallet(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<UpdateWalletRequest>,
) -> Result<Json<Wallet>, ApiError> {
    req.validate()?;

    let wallet = state
        .account_service
        .upsert_wallet(auth.user.id, &req.wallet_address)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %auth.user.id, error = %e, "Error updating or creating wallet");
            ApiError::InternalError(e.to_string())
        })?;

    Ok(Json(wallet))
}

/// GET /api/users/wallet - List the caller's wallets
pub async fn get_wallets(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Wallet>>, ApiError> {
    let wallets = state.account_service.wallets_for(auth.user.id).await?;

    Ok(Json(wallets))
}
