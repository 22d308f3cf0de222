//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::AccountService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
}

impl AppState {
    pub fn new(account_service: Arc<AccountService>) -> Self {
        Self { account_service }
    }
}

impl FromRef<AppState> for Arc<AccountService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.account_service.clone()
    }
}
