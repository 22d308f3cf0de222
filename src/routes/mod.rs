//! Route definitions for the Questline API

mod user;
mod wallet;

pub use user::user_routes;
pub use wallet::wallet_routes;
