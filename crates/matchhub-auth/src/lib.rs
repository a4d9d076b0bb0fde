//! # matchhub-auth
//!
//! Authentication for MatchHub: Argon2id password hashing and the account
//! service handling registration and login credential checks.

pub mod account;
pub mod password;

pub use account::AccountService;
pub use password::hasher::PasswordHasher;
