//! Game rule and presence configuration.

use serde::{Deserialize, Serialize};

/// Board game and presence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square board.
    #[serde(default = "default_board_size")]
    pub board_size: usize,
    /// Seconds of inactivity after which a gamer presence record is purged.
    #[serde(default = "default_presence_ttl")]
    pub presence_ttl_seconds: u64,
    /// Interval between presence sweeper passes, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub presence_sweep_interval_seconds: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            presence_ttl_seconds: default_presence_ttl(),
            presence_sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_board_size() -> usize {
    4
}

fn default_presence_ttl() -> u64 {
    60 * 60
}

fn default_sweep_interval() -> u64 {
    60
}
