//! Storage-collaborator traits.
//!
//! The realtime core addresses durable state exclusively through these
//! seams. The PostgreSQL implementations live in `matchhub-database`;
//! integration tests substitute in-memory implementations.

use std::time::Duration;

use async_trait::async_trait;

use matchhub_board::Board;
use matchhub_core::result::AppResult;
use matchhub_core::types::{GameId, SessionId};

use crate::game::{ChatEntry, Game, GameState};
use crate::gamer::Gamer;
use crate::user::{NewUser, User};

/// Durable user credential storage.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by login name.
    async fn find_by_user_name(&self, user_name: &str) -> AppResult<Option<User>>;

    /// Create a new user and return it.
    async fn create(&self, data: &NewUser) -> AppResult<User>;
}

/// Gamer presence roster storage.
#[async_trait]
pub trait GamerStore: Send + Sync + 'static {
    /// Find the gamer bound to the given session id.
    async fn find_by_sid(&self, sid: &SessionId) -> AppResult<Option<Gamer>>;

    /// Find all gamers bound to any of the given session ids.
    async fn find_by_sids(&self, sids: &[SessionId]) -> AppResult<Vec<Gamer>>;

    /// Refresh `updated_on` for every record bound to one of the given
    /// session ids. Returns the number of refreshed records.
    async fn touch(&self, sids: &[SessionId]) -> AppResult<u64>;

    /// Create or overwrite the presence record for a user, binding it to
    /// the given session id. Called on every successful authentication.
    async fn upsert(&self, user_name: &str, full_name: &str, sid: &SessionId) -> AppResult<()>;

    /// Delete records whose `updated_on` is older than the TTL. Returns
    /// the number of purged records.
    async fn purge_stale(&self, ttl: Duration) -> AppResult<u64>;
}

/// Game document storage.
#[async_trait]
pub trait GameStore: Send + Sync + 'static {
    /// Atomically create a new game between two players. The first player
    /// is both the starting player and the first `current_player`; the
    /// board starts empty at the given size.
    async fn create(
        &self,
        player1: &Gamer,
        player2: &Gamer,
        board_size: usize,
    ) -> AppResult<Game>;

    /// Find a game by id.
    async fn find(&self, id: &GameId) -> AppResult<Option<Game>>;

    /// Conditional update: persist the new board and flip `current_player`
    /// to `next`, but only if the stored `current_player` still equals
    /// `acting` at write time. Returns `false` when the condition failed
    /// and zero records were affected — the caller must treat that as
    /// "not your turn". This is the authoritative turn-lock.
    async fn update_board(
        &self,
        id: &GameId,
        acting: &SessionId,
        next: &SessionId,
        board: &Board,
    ) -> AppResult<bool>;

    /// Append one entry to the game's chat log.
    async fn append_chat(&self, id: &GameId, entry: &ChatEntry) -> AppResult<()>;

    /// Record a terminal state transition.
    async fn set_state(&self, id: &GameId, state: GameState) -> AppResult<()>;
}
