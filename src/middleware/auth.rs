//! Session verification middleware
//!
//! Extractor that validates the session cookie and attaches the resolved
//! user record to the request. Handlers taking [`AuthenticatedUser`] never
//! re-validate the token themselves.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use crate::auth::jwt::{user_id_from_claims, verify_token, JwtError};
use crate::auth::{AccountError, AccountService, SESSION_COOKIE};
use crate::error::ApiError;
use crate::models::User;

/// Authenticated user resolved from the session cookie
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}

/// Map a failure while resolving the token subject to a response.
///
/// Only an unknown subject is an authentication problem; any other store
/// failure keeps its error class so outages surface as logged 500s, not
/// phantom 401s.
fn store_rejection(e: AccountError) -> Response {
    match e {
        AccountError::UserNotFound => unauthorized("Invalid session"),
        other => ApiError::from(other).into_response(),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AccountService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // CookieJar extraction is infallible; an absent header is an empty jar.
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| unauthorized("Authentication required"))?;

        let token = jar
            .get(SESSION_COOKIE)
            .ok_or_else(|| unauthorized("Authentication required"))?;

        let account_service = Arc::<AccountService>::from_ref(state);

        let claims = verify_token(token.value(), account_service.jwt_secret()).map_err(|e| {
            match e {
                JwtError::TokenExpired => unauthorized("Session expired"),
                _ => unauthorized("Invalid session"),
            }
        })?;

        let user_id =
            user_id_from_claims(&claims).map_err(|_| unauthorized("Invalid session"))?;

        // Resolve the subject to a stored user so handlers see the full
        // record, not just the id.
        let user = account_service
            .user_by_id(user_id)
            .await
            .map_err(store_rejection)?;

        Ok(AuthenticatedUser { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, Request, StatusCode};
    use chrono::Duration;
    use sqlx::postgres::PgPoolOptions;
    use uuid::Uuid;

    use crate::auth::issue_token;
    use crate::state::AppState;

    const SECRET: &str = "extractor-test-secret";

    /// State over a lazy pool pointing nowhere: queries fail fast, which
    /// stands in for a store outage.
    fn unreachable_state() -> AppState {
        let pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(100))
            .connect_lazy("postgresql://127.0.0.1:1/unreachable")
            .unwrap();

        AppState::new(Arc::new(AccountService::new(
            pool,
            SECRET.to_string(),
            4,
            Duration::hours(5),
            Duration::days(30),
            Duration::hours(1),
        )))
    }

    fn parts_with_cookie(cookie: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/api/users/me");
        if let Some(value) = cookie {
            builder = builder.header(COOKIE, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_store_rejection_keeps_error_class() {
        // Unknown subject is an auth failure; anything else is a server error.
        assert_eq!(
            store_rejection(AccountError::UserNotFound).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            store_rejection(AccountError::DatabaseError("connection refused".to_string()))
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_missing_cookie_is_unauthorized() {
        let state = unreachable_state();
        let mut parts = parts_with_cookie(None);

        let rejection = AuthenticatedUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let state = unreachable_state();
        let mut parts =
            parts_with_cookie(Some(format!("{SESSION_COOKIE}=not.a.real.token")));

        let rejection = AuthenticatedUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_store_outage_is_a_server_error_not_unauthorized() {
        // A valid token whose subject lookup hits an unreachable store must
        // surface as a 500, not be misreported as an invalid session.
        let state = unreachable_state();
        let token = issue_token(Uuid::new_v4(), SECRET, Duration::hours(1)).unwrap();
        let mut parts = parts_with_cookie(Some(format!("{SESSION_COOKIE}={token}")));

        let rejection = AuthenticatedUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(rejection.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
