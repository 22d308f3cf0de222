//! API handlers for the Questline account service

pub mod auth;
pub mod user;
pub mod wallet;

pub use auth::{login, oauth_login, register, sign_out};
pub use user::{get_achievements, get_user_details, update_profile};
pub use wallet::{get_wallets, update_wallet};
