//! Background TTL expiry for gamer presence records.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use matchhub_core::config::game::GameConfig;
use matchhub_entity::GamerStore;

/// Periodically purges presence records whose `updated_on` is older than
/// the configured TTL — the storage-level expiry bound on presence
/// staleness (there is no heartbeat).
pub struct PresenceSweeper {
    gamers: Arc<dyn GamerStore>,
    ttl: Duration,
    interval: Duration,
}

impl PresenceSweeper {
    /// Create a sweeper from configuration.
    pub fn new(gamers: Arc<dyn GamerStore>, config: &GameConfig) -> Self {
        Self {
            gamers,
            ttl: Duration::from_secs(config.presence_ttl_seconds),
            interval: Duration::from_secs(config.presence_sweep_interval_seconds),
        }
    }

    /// Run sweep passes until the shutdown signal flips to `true`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            ttl_seconds = self.ttl.as_secs(),
            interval_seconds = self.interval.as_secs(),
            "Presence sweeper started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.gamers.purge_stale(self.ttl).await {
                        Ok(0) => {}
                        Ok(purged) => {
                            debug!(purged, "Purged stale gamer presence records");
                        }
                        Err(e) => {
                            warn!(error = %e, "Presence sweep failed");
                        }
                    }
                }
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Presence sweeper stopped");
    }
}
