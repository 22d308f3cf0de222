//! Authentication for the Questline account service
//!
//! - bcrypt password hashing and verification
//! - Signed, time-bounded session tokens (JWT)
//! - Session cookie construction and clearing
//! - Account business logic over the credential store

pub mod jwt;
pub mod password;
pub mod service;
pub mod session;

pub use jwt::{issue_token, verify_token, Claims};
pub use password::{hash_password, verify_password};
pub use service::{AccountError, AccountService};
pub use session::{clear_session_cookie, session_cookie, SESSION_COOKIE};
