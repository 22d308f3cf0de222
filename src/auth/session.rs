//! Session cookie construction
//!
//! The session token travels in a `token` cookie with one uniform policy
//! on every issuance path: `HttpOnly; Secure; SameSite=Lax; Path=/`.

use axum::http::{header::InvalidHeaderValue, HeaderValue};
use chrono::Duration;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Build a `Set-Cookie` value carrying the session token
pub fn session_cookie(token: &str, max_age: Duration) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age={}",
        max_age.num_seconds()
    ))
}

/// Build a `Set-Cookie` value that clears the session cookie
///
/// Attributes must match the issuance policy or browsers keep the old
/// cookie around.
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("token=; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age=0")
}
