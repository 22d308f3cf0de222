//! Middleware for the Questline API
//!
//! Request tracing, security headers, and the session-cookie verifier.

pub mod auth;
mod security;
mod trace;

pub use auth::AuthenticatedUser;
pub use security::security_headers;
pub use trace::request_tracing;
