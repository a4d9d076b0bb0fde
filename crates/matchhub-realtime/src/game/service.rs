//! Game session service — the authoritative per-game state machine.
//!
//! `InProgress → {Won, Drawn}`, driven by move application. Turn
//! enforcement is the storage layer's conditional update on
//! `current_player`: the occupied-cell check against the loaded copy is
//! an optimistic fast path only, while the zero-rows outcome of the
//! conditional write is the real guard against races, including two
//! moves for the same turn arriving concurrently.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use matchhub_board::Marker;
use matchhub_core::error::AppError;
use matchhub_core::result::AppResult;
use matchhub_core::types::{GameId, SessionId};
use matchhub_entity::game::{ChatEntry, GameState};
use matchhub_entity::GameStore;

use crate::message::{events, Envelope};
use crate::session::SessionRegistry;

/// Payload of an accepted move, sent to both players.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePayload {
    /// Row index of the placed marker.
    pub row: usize,
    /// Column index of the placed marker.
    pub col: usize,
    /// The placed marker.
    pub marker: Marker,
}

/// Payload of a chat message delivered to the opponent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatDelivery<'a> {
    /// The sender's session id.
    from_sid: SessionId,
    /// Message text.
    message: &'a str,
}

/// Applies moves and chat to game documents, notifying both players.
pub struct GameService {
    registry: Arc<SessionRegistry>,
    games: Arc<dyn GameStore>,
}

impl GameService {
    /// Create a new game service.
    pub fn new(registry: Arc<SessionRegistry>, games: Arc<dyn GameStore>) -> Self {
        Self { registry, games }
    }

    /// Place a marker for the acting session.
    ///
    /// A persisted move stands even when the opponent turns out to be
    /// unreachable afterwards — the returned `PeerUnavailable` reports
    /// the delivery failure, not a rollback.
    pub async fn place_marker(
        &self,
        from: &SessionId,
        game_id: &GameId,
        row: usize,
        col: usize,
    ) -> AppResult<()> {
        let game = self
            .games
            .find(game_id)
            .await?
            .ok_or_else(|| AppError::not_found("Could not find the game"))?;

        let mut board = game.board.clone();
        if !board.in_bounds(row, col) {
            return Err(AppError::validation("Cell is outside the board"));
        }
        if board.is_occupied(row, col) {
            return Err(AppError::already_occupied("Cell already selected"));
        }

        let marker = game.marker_for(from);
        let opponent = game.opponent_of(from);
        board.set(row, col, marker);

        let updated = self
            .games
            .update_board(game_id, from, &opponent, &board)
            .await?;
        if !updated {
            return Err(AppError::not_your_turn("It is not your turn"));
        }

        let Some(opponent_conn) = self.registry.resolve(&opponent) else {
            // The move is already persisted; only delivery failed.
            return Err(AppError::peer_unavailable("User is no longer available"));
        };
        let caller = self.registry.resolve(from);

        let payload = MovePayload { row, col, marker };
        if let Some(caller) = &caller {
            caller.send(&Envelope::with_result(events::PLACE_MARKER, &payload));
        }
        opponent_conn.send(&Envelope::with_result(events::GAME_MOVE, &payload));

        if board.winning_move(row, col, marker) {
            info!(game_id = %game_id, winner = %from, "Game won");
            self.record_terminal_state(game_id, GameState::Won).await;

            let over = Envelope::with_result(events::GAME_OVER, &serde_json::json!({"winner": from}));
            if let Some(caller) = &caller {
                caller.send(&over);
            }
            opponent_conn.send(&over);
        } else if board.is_full() {
            info!(game_id = %game_id, "Game drawn");
            self.record_terminal_state(game_id, GameState::Drawn).await;

            let over = Envelope::with_result(events::GAME_OVER, &serde_json::json!({"draw": true}));
            if let Some(caller) = &caller {
                caller.send(&over);
            }
            opponent_conn.send(&over);
        }

        Ok(())
    }

    /// Send a chat message to the opponent in a game.
    ///
    /// Chat is independent of turn state and permitted in terminal games.
    pub async fn send_message(
        &self,
        from: &SessionId,
        game_id: &GameId,
        message: &str,
    ) -> AppResult<()> {
        let game = self.games.find(game_id).await?.ok_or_else(|| {
            AppError::not_found(format!("could not find the game with id {game_id}"))
        })?;

        let opponent = game.opponent_of(from);
        let opponent_conn = self
            .registry
            .resolve(&opponent)
            .ok_or_else(|| AppError::peer_unavailable("User is no longer available"))?;

        let entry = ChatEntry {
            from: game.user_name_of(from).to_string(),
            to: game.user_name_of(&opponent).to_string(),
            message: message.to_string(),
        };
        self.games.append_chat(game_id, &entry).await?;

        opponent_conn.send(&Envelope::with_result(
            events::CHAT_MESSAGE,
            &ChatDelivery {
                from_sid: *from,
                message,
            },
        ));
        if let Some(caller) = self.registry.resolve(from) {
            caller.send(&Envelope::with_result(
                events::SEND_MESSAGE,
                &serde_json::json!({}),
            ));
        }
        Ok(())
    }

    /// Best-effort terminal-state persistence: the move and its
    /// notifications are already committed, so a failure here is logged
    /// and not surfaced.
    async fn record_terminal_state(&self, game_id: &GameId, state: GameState) {
        if let Err(e) = self.games.set_state(game_id, state).await {
            warn!(game_id = %game_id, state = %state, error = %e, "Failed to record terminal game state");
        }
    }
}
