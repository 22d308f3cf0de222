//! Password hashing
//!
//! One-way salted hashing of account passwords with bcrypt.

use thiserror::Error;

/// Errors that can occur while hashing a password
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

/// Hash a plaintext password with the given bcrypt work factor
///
/// The salt is generated per call and embedded in the returned hash.
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String, PasswordError> {
    bcrypt::hash(plaintext, cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
}

/// Check a plaintext password against a stored hash
///
/// Returns false on mismatch or when the stored hash is malformed (for
/// example the empty hash of an OAuth-created account); never an error.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    bcrypt::verify(plaintext, stored_hash).unwrap_or(false)
}
