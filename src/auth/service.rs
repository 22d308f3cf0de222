//! Account service
//!
//! Core business logic for registration, login and profile data. Every
//! operation is a single read or write against the store; uniqueness races
//! are settled by the database's unique constraints, not application checks.

use chrono::Duration;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Achievement, User, Wallet};

use super::jwt::{issue_token, JwtError};
use super::password::{hash_password, verify_password, PasswordError};

/// Account service errors
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("User already exists")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Wrong password")]
    WrongPassword,

    #[error("Password hashing error: {0}")]
    HashingError(String),

    #[error("Token error: {0}")]
    TokenError(String),
}

impl From<sqlx::Error> for AccountError {
    fn from(e: sqlx::Error) -> Self {
        AccountError::DatabaseError(e.to_string())
    }
}

impl From<PasswordError> for AccountError {
    fn from(e: PasswordError) -> Self {
        AccountError::HashingError(e.to_string())
    }
}

impl From<JwtError> for AccountError {
    fn from(e: JwtError) -> Self {
        AccountError::TokenError(e.to_string())
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::EmailTaken => ApiError::BadRequest("User already exists".to_string()),
            AccountError::UserNotFound => ApiError::NotFound("User not found".to_string()),
            AccountError::WrongPassword => ApiError::BadRequest("Wrong password".to_string()),
            AccountError::DatabaseError(detail) => ApiError::DatabaseError(detail),
            AccountError::HashingError(detail) | AccountError::TokenError(detail) => {
                ApiError::InternalError(detail)
            }
        }
    }
}

const USER_COLUMNS: &str =
    "id, email, password_hash, name, address, phone, created_at, updated_at";

/// Account service
#[derive(Clone)]
pub struct AccountService {
    db_pool: PgPool,
    jwt_secret: String,
    bcrypt_cost: u32,
    register_token_ttl: Duration,
    session_token_ttl: Duration,
    oauth_token_ttl: Duration,
}

impl AccountService {
    /// Create a new AccountService
    pub fn new(
        db_pool: PgPool,
        jwt_secret: String,
        bcrypt_cost: u32,
        register_token_ttl: Duration,
        session_token_ttl: Duration,
        oauth_token_ttl: Duration,
    ) -> Self {
        Self {
            db_pool,
            jwt_secret,
            bcrypt_cost,
            register_token_ttl,
            session_token_ttl,
            oauth_token_ttl,
        }
    }

    /// Register a new account with a hashed password
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        address: &str,
        phone: &str,
    ) -> Result<User, AccountError> {
        let existing: Option<User> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?;

        if existing.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let password_hash = hash_password(password, self.bcrypt_cost)?;

        // The pre-check races with concurrent registrations; the unique
        // index on email is the actual safety net.
        let user: User = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (id, email, password_hash, name, address, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(&password_hash)
        .bind(name)
        .bind(address)
        .bind(phone)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                AccountError::EmailTaken
            } else {
                AccountError::from(e)
            }
        })?;

        Ok(user)
    }

    /// Authenticate with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let user: User = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(AccountError::UserNotFound)?;

        // Empty stored hashes (OAuth accounts) never verify.
        if !verify_password(password, &user.password_hash) {
            return Err(AccountError::WrongPassword);
        }

        Ok(user)
    }

    /// Find or create an account for an upstream-verified OAuth identity
    ///
    /// Created accounts carry an empty password hash. Returns the user and
    /// whether a new row was created. Idempotent: a concurrent creator
    /// winning the insert race is treated as "found".
    pub async fn oauth_login(&self, name: &str, email: &str) -> Result<(User, bool), AccountError> {
        if let Some(user) = self.user_by_email(email).await? {
            return Ok((user, false));
        }

        let inserted: Option<User> = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (id, email, password_hash, name, created_at, updated_at)
            VALUES ($1, $2, '', $3, NOW(), NOW())
            ON CONFLICT (email) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(name)
        .fetch_optional(&self.db_pool)
        .await?;

        if let Some(user) = inserted {
            return Ok((user, true));
        }

        // Lost the race; the row exists now.
        self.user_by_email(email)
            .await?
            .map(|user| (user, false))
            .ok_or(AccountError::UserNotFound)
    }

    /// Update the profile fields of an existing account
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        name: &str,
        address: &str,
        phone: &str,
    ) -> Result<User, AccountError> {
        sqlx::query_as(&format!(
            r#"
            UPDATE users
            SET name = $1, address = $2, phone = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(AccountError::UserNotFound)
    }

    /// Associate a wallet address with a user
    ///
    /// Upsert keyed by address; an address already owned by another user is
    /// re-associated to the caller (last writer wins).
    pub async fn upsert_wallet(
        &self,
        user_id: Uuid,
        address: &str,
    ) -> Result<Wallet, AccountError> {
        let wallet: Wallet = sqlx::query_as(
            r#"
            INSERT INTO wallets (id, address, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            ON CONFLICT (address) DO UPDATE
            SET user_id = EXCLUDED.user_id, updated_at = NOW()
            RETURNING id, address, user_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(address)
        .bind(user_id)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(wallet)
    }

    /// List wallets owned by a user
    pub async fn wallets_for(&self, user_id: Uuid) -> Result<Vec<Wallet>, AccountError> {
        let wallets: Vec<Wallet> = sqlx::query_as(
            r#"
            SELECT id, address, user_id, created_at, updated_at
            FROM wallets
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(wallets)
    }

    /// List achievements earned by a user
    pub async fn achievements_for(&self, user_id: Uuid) -> Result<Vec<Achievement>, AccountError> {
        let achievements: Vec<Achievement> = sqlx::query_as(
            r#"
            SELECT id, user_id, title, description, earned_at
            FROM achievements
            WHERE user_id = $1
            ORDER BY earned_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(achievements)
    }

    /// Get a user by id (used by the session verifier)
    pub async fn user_by_id(&self, user_id: Uuid) -> Result<User, AccountError> {
        sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AccountError::UserNotFound)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        let user: Option<User> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(user)
    }

    /// Mint a session token for a user with an explicit TTL
    pub fn issue_session_token(
        &self,
        user_id: Uuid,
        ttl: Duration,
    ) -> Result<String, AccountError> {
        Ok(issue_token(user_id, &self.jwt_secret, ttl)?)
    }

    /// TTL for sessions issued at registration
    pub fn register_token_ttl(&self) -> Duration {
        self.register_token_ttl
    }

    /// TTL for sessions issued at credential login
    pub fn session_token_ttl(&self) -> Duration {
        self.session_token_ttl
    }

    /// TTL for sessions issued at OAuth login
    pub fn oauth_token_ttl(&self) -> Duration {
        self.oauth_token_ttl
    }

    /// Signing secret (for the session verifier)
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}
