//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use matchhub_core::types::UserId;

/// A registered user.
///
/// Created once at registration and immutable thereafter (credential
/// rotation is out of scope).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub user_name: String,
    /// Human-readable display name.
    pub full_name: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Desired login name.
    pub user_name: String,
    /// Display name.
    pub full_name: String,
    /// Pre-hashed password.
    pub password_hash: String,
}
