//! Gamer presence record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use matchhub_core::types::SessionId;

/// Denormalized presence record for an authenticated user.
///
/// Keyed by `user_name`; at most one record exists per user. The `sid`
/// field reflects only the most recent authenticated connection — a stale
/// record from a previous connection is silently overwritten on the next
/// login. `updated_on` is the lazy liveness signal consumed by the
/// presence sweeper's TTL expiry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Gamer {
    /// The user this record belongs to.
    pub user_name: String,
    /// Display name, denormalized at login for invite/game payloads.
    pub full_name: String,
    /// Session id of the user's most recent authenticated connection.
    pub sid: SessionId,
    /// Last-active timestamp, refreshed on login and directory listings.
    pub updated_on: DateTime<Utc>,
}
