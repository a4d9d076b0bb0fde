//! Gamer directory — lists available gamers and maintains presence
//! records.
//!
//! Availability is derived live: a gamer is listed only when their
//! recorded sid is currently a connected, non-excluded session in the
//! registry. The presence table remains the profile source; each listing
//! lazily refreshes `updated_on` for the returned sids so the TTL sweeper
//! only purges genuinely idle records.

use std::sync::Arc;

use matchhub_core::result::AppResult;
use matchhub_core::types::SessionId;
use matchhub_entity::gamer::Gamer;
use matchhub_entity::GamerStore;

use crate::session::SessionRegistry;

/// Directory of available (connected, authenticated) gamers.
pub struct GamerDirectory {
    registry: Arc<SessionRegistry>,
    gamers: Arc<dyn GamerStore>,
}

impl GamerDirectory {
    /// Create a new directory.
    pub fn new(registry: Arc<SessionRegistry>, gamers: Arc<dyn GamerStore>) -> Self {
        Self { registry, gamers }
    }

    /// List gamers whose sid is a live connection, excluding the caller,
    /// refreshing their last-active timestamps.
    pub async fn list_available(&self, excluding: &SessionId) -> AppResult<Vec<Gamer>> {
        let sids = self.registry.connected_sids_except(excluding);
        if sids.is_empty() {
            return Ok(Vec::new());
        }

        let gamers = self.gamers.find_by_sids(&sids).await?;
        self.gamers.touch(&sids).await?;
        Ok(gamers)
    }

    /// Upsert the presence record for a user on successful
    /// authentication, binding it to the current session id.
    pub async fn register_presence(
        &self,
        user_name: &str,
        full_name: &str,
        sid: &SessionId,
    ) -> AppResult<()> {
        self.gamers.upsert(user_name, full_name, sid).await
    }

    /// The gamer profile bound to a session id.
    pub async fn profile_for(&self, sid: &SessionId) -> AppResult<Option<Gamer>> {
        self.gamers.find_by_sid(sid).await
    }
}
