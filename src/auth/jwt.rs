//! Session token generation and validation
//!
//! Mints signed, time-bounded tokens binding a user id to an absolute
//! expiry. TTL is always an explicit caller-supplied parameter and the
//! expiry is always `now + ttl`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Token-related errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Token decoding failed: {0}")]
    DecodingFailed(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Issue a session token for a user
///
/// # Arguments
/// * `user_id` - The authenticated user's id
/// * `secret` - Signing secret
/// * `ttl` - Token time-to-live; expiry is `now + ttl`
pub fn issue_token(user_id: Uuid, secret: &str, ttl: Duration) -> Result<String, JwtError> {
    let now = Utc::now();
    let exp = now + ttl;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::EncodingFailed(e.to_string()))
}

/// Verify a session token's signature and expiry
///
/// Expiry is checked with zero leeway: a token is rejected the moment
/// `now` passes its `exp` claim.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        _ => JwtError::DecodingFailed(e.to_string()),
    })?;

    Ok(token_data.claims)
}

/// Extract the user id from verified claims
pub fn user_id_from_claims(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|e| JwtError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key";

    #[test]
    fn test_issue_and_verify_token() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, SECRET, Duration::hours(5)).unwrap();
        assert!(!token.is_empty());

        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(user_id_from_claims(&claims).unwrap(), user_id);
    }

    #[test]
    fn test_expiry_is_now_plus_ttl() {
        let before = Utc::now().timestamp();
        let token = issue_token(Uuid::new_v4(), SECRET, Duration::days(30)).unwrap();
        let after = Utc::now().timestamp();

        let claims = verify_token(&token, SECRET).unwrap();
        let thirty_days = 30 * 24 * 60 * 60;
        assert!(claims.exp >= before + thirty_days);
        assert!(claims.exp <= after + thirty_days);
        assert_eq!(claims.exp - claims.iat, thirty_days);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // A negative TTL puts the expiry in the past; with zero leeway the
        // verifier must reject it.
        let token = issue_token(Uuid::new_v4(), SECRET, Duration::seconds(-2)).unwrap();
        let result = verify_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_token_valid_until_expiry() {
        let token = issue_token(Uuid::new_v4(), SECRET, Duration::seconds(60)).unwrap();
        assert!(verify_token(&token, SECRET).is_ok());
    }

    #[test]
    fn test_invalid_token() {
        let result = verify_token("invalid.token.here", SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let token = issue_token(Uuid::new_v4(), "secret1", Duration::hours(1)).unwrap();
        let result = verify_token(&token, "secret2");
        assert!(result.is_err());
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 60,
        };
        assert!(user_id_from_claims(&claims).is_err());
    }
}
