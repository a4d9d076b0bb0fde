//! Game document model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use matchhub_board::{Board, Marker};
use matchhub_core::types::{GameId, SessionId};

/// Lifecycle state of a game.
///
/// `InProgress` is the only non-terminal state; `Won` and `Drawn` are
/// terminal. Chat is permitted in every state, including terminal ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "game_state", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// Moves are still being accepted.
    InProgress,
    /// A player completed a winning line.
    Won,
    /// The board filled with no winner.
    Drawn,
}

impl GameState {
    /// Return the state as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Won => "won",
            Self::Drawn => "drawn",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GameState {
    type Err = matchhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "won" => Ok(Self::Won),
            "drawn" => Ok(Self::Drawn),
            _ => Err(matchhub_core::AppError::validation(format!(
                "Invalid game state: '{s}'. Expected one of: in_progress, won, drawn"
            ))),
        }
    }
}

/// One chat line attached to a game. The log is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    /// Sender's user name.
    pub from: String,
    /// Recipient's user name.
    pub to: String,
    /// Message text.
    pub message: String,
}

/// The durable record of one match: players, board, turn, chat.
///
/// Invariants: exactly one of the two player sids equals `current_player`
/// at all times; board cells are written at most once; `chat` only grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Unique game identifier.
    pub id: GameId,
    /// First player's session id at acceptance time.
    pub player1_sid: SessionId,
    /// First player's user name.
    pub player1_user_name: String,
    /// First player's display name.
    pub player1_full_name: String,
    /// Second player's session id at acceptance time.
    pub player2_sid: SessionId,
    /// Second player's user name.
    pub player2_user_name: String,
    /// Second player's display name.
    pub player2_full_name: String,
    /// The board grid.
    pub board: Board,
    /// Session id of the player who moved first; fixes marker assignment
    /// for the whole game.
    pub starting_player: SessionId,
    /// Session id allowed to move next.
    pub current_player: SessionId,
    /// Lifecycle state.
    pub state: GameState,
    /// Append-only chat log.
    pub chat: Vec<ChatEntry>,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
}

impl Game {
    /// Whether the given session belongs to one of the two players.
    pub fn has_player(&self, sid: &SessionId) -> bool {
        self.player1_sid == *sid || self.player2_sid == *sid
    }

    /// The marker assigned to the given player: the starting player is
    /// always `X`, the other player always `O`, for the game's lifetime,
    /// regardless of whose turn it currently is.
    pub fn marker_for(&self, sid: &SessionId) -> Marker {
        if self.starting_player == *sid {
            Marker::X
        } else {
            Marker::O
        }
    }

    /// The other player's session id.
    pub fn opponent_of(&self, sid: &SessionId) -> SessionId {
        if self.player1_sid == *sid {
            self.player2_sid
        } else {
            self.player1_sid
        }
    }

    /// The user name stored for the given player sid.
    pub fn user_name_of(&self, sid: &SessionId) -> &str {
        if self.player1_sid == *sid {
            &self.player1_user_name
        } else {
            &self.player2_user_name
        }
    }
}
