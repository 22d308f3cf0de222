//! Authentication core tests
//!
//! Validates the credential-hashing and session-token contracts that the
//! account handlers rely on, without touching the database.

use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use questline_backend::auth::jwt::{user_id_from_claims, JwtError};
use questline_backend::auth::session::{clear_session_cookie, session_cookie, SESSION_COOKIE};
use questline_backend::auth::{hash_password, issue_token, verify_password, verify_token};
use questline_backend::error::ApiError;
use questline_backend::models::{
    LoginRequest, OAuthLoginRequest, RegisterRequest, UpdateProfileRequest, UpdateWalletRequest,
};

const SECRET: &str = "integration-test-secret";
const TEST_COST: u32 = 4;

// ============================================================================
// Password hashing
// ============================================================================

#[test]
fn test_password_roundtrip() {
    let hash = hash_password("correct horse battery staple", TEST_COST).unwrap();
    assert!(verify_password("correct horse battery staple", &hash));
    assert!(!verify_password("correct horse battery stable", &hash));
}

#[test]
fn test_verify_never_errors_on_garbage_hash() {
    assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    assert!(!verify_password("anything", ""));
}

// ============================================================================
// Session tokens
// ============================================================================

#[test]
fn test_token_roundtrip_binds_subject() {
    let user_id = Uuid::new_v4();
    let token = issue_token(user_id, SECRET, Duration::hours(1)).unwrap();

    let claims = verify_token(&token, SECRET).unwrap();
    assert_eq!(user_id_from_claims(&claims).unwrap(), user_id);
}

#[test]
fn test_token_expiry_is_now_plus_ttl() {
    // The 30-day issuance path must add the full TTL, not a constant.
    let issued_at = Utc::now().timestamp();
    let token = issue_token(Uuid::new_v4(), SECRET, Duration::days(30)).unwrap();
    let claims = verify_token(&token, SECRET).unwrap();

    let expected = issued_at + 30 * 24 * 60 * 60;
    assert!((claims.exp - expected).abs() <= 1);
}

#[test]
fn test_token_rejected_after_expiry() {
    let token = issue_token(Uuid::new_v4(), SECRET, Duration::seconds(-1)).unwrap();
    assert!(matches!(
        verify_token(&token, SECRET),
        Err(JwtError::TokenExpired)
    ));
}

#[test]
fn test_token_accepted_before_expiry() {
    let token = issue_token(Uuid::new_v4(), SECRET, Duration::seconds(30)).unwrap();
    assert!(verify_token(&token, SECRET).is_ok());
}

#[test]
fn test_token_rejected_with_wrong_secret() {
    let token = issue_token(Uuid::new_v4(), SECRET, Duration::hours(1)).unwrap();
    assert!(verify_token(&token, "some-other-secret").is_err());
}

// ============================================================================
// Session cookie policy
// ============================================================================

#[test]
fn test_issued_cookie_attributes_are_uniform() {
    let cookie = session_cookie("tok", Duration::days(30)).unwrap();
    let value = cookie.to_str().unwrap();

    assert!(value.starts_with(&format!("{SESSION_COOKIE}=tok;")));
    assert!(value.contains("HttpOnly"));
    assert!(value.contains("Secure"));
    assert!(value.contains("SameSite=Lax"));
    assert!(value.contains("Path=/"));
    assert!(value.contains(&format!("Max-Age={}", 30 * 24 * 60 * 60)));
}

#[test]
fn test_clear_cookie_invalidates_session() {
    let value = clear_session_cookie();
    let value = value.to_str().unwrap();

    assert!(value.starts_with(&format!("{SESSION_COOKIE}=;")));
    assert!(value.contains("Max-Age=0"));
}

// ============================================================================
// Request validation
// ============================================================================

#[test]
fn test_every_post_body_rejects_missing_fields() {
    let register: RegisterRequest = serde_json::from_str("{}").unwrap();
    assert!(register.validate().is_err());

    let login: LoginRequest = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
    assert!(login.validate().is_err());

    let oauth: OAuthLoginRequest = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
    assert!(oauth.validate().is_err());

    let profile: UpdateProfileRequest =
        serde_json::from_str(r#"{"name":"Ada","address":"1 Main St"}"#).unwrap();
    assert!(profile.validate().is_err());

    let wallet: UpdateWalletRequest = serde_json::from_str("{}").unwrap();
    assert!(wallet.validate().is_err());
}

#[test]
fn test_validation_errors_map_to_bad_request() {
    let register: RegisterRequest = serde_json::from_str("{}").unwrap();
    let err: ApiError = register.validate().unwrap_err().into();
    assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
}
