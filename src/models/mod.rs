//! Data models for the Questline account service

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// User account model
///
/// `password_hash` is empty for accounts created through OAuth login;
/// those accounts cannot authenticate with a password.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wallet associated with a user
///
/// One row per address; re-associating an address to another user is a
/// last-writer-wins upsert.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Wallet {
    pub id: Uuid,
    pub address: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Achievement earned by a user (read-only from this service)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Achievement {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub earned_at: DateTime<Utc>,
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Registration request body
///
/// Missing keys deserialize to empty strings so a missing field produces
/// the same 400 `{message}` response as an empty one.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
}

/// Credential login request body
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// OAuth-style login request body (identity already verified upstream)
#[derive(Debug, Deserialize, Validate)]
pub struct OAuthLoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
}

/// Profile update request body
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
}

/// Wallet association request body
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWalletRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "wallet_address is required"))]
    pub wallet_address: String,
}

/// Short user summary returned with session issuance
#[derive(Debug, Serialize, Clone)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
}

/// Response body for endpoints that issue a session cookie
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserSummary,
}

/// User record sanitized for API responses (no credential material)
#[derive(Debug, Serialize, Clone)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Plain confirmation body (sign-out, errors)
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            address: user.address,
            phone: user.phone,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_rejects_missing_fields() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_accepts_complete_body() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@b.c","password":"pw","name":"Ada","address":"1 Main St","phone":"555"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_login_request_rejects_empty_password() {
        let req: LoginRequest = serde_json::from_str(r#"{"email":"a@b.c","password":""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.c".to_string(),
            password_hash: "$2b$10$secret".to_string(),
            name: "Ada".to_string(),
            address: None,
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("secret"));
    }
}
