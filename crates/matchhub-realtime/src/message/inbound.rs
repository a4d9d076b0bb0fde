//! Inbound request parsing.

use serde::Deserialize;

use matchhub_core::types::{GameId, SessionId};

use super::events;

/// A request frame sent by a client: `{event: <name>, ...fields}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientRequest {
    /// Register a new user, then log in.
    Register {
        /// Display name.
        full_name: String,
        /// Desired login name.
        user_name: String,
        /// Plaintext password (hashed before storage).
        password: String,
    },
    /// Log in an existing user.
    Login {
        /// Login name.
        user_name: String,
        /// Plaintext password.
        password: String,
    },
    /// List available gamers, excluding the caller.
    FindAllAvailableGamers,
    /// Invite the gamer bound to the given session id.
    InviteGamer {
        /// Target session id.
        sid: SessionId,
    },
    /// Decline an invite from the given session id.
    DeclineGame {
        /// The inviter's session id.
        sid: SessionId,
    },
    /// Accept an invite from the given session id.
    AcceptGame {
        /// The inviter's session id.
        sid: SessionId,
    },
    /// Place a marker on a game's board.
    PlaceMarker {
        /// Target game.
        game_id: GameId,
        /// Row index of the cell.
        row: usize,
        /// Column index of the cell.
        col: usize,
    },
    /// Send a chat message within a game.
    SendMessage {
        /// Target game.
        game_id: GameId,
        /// Message text.
        message: String,
    },
}

impl ClientRequest {
    /// The wire event name, used for response envelopes.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Register { .. } => events::REGISTER,
            Self::Login { .. } => events::LOGIN,
            Self::FindAllAvailableGamers => events::FIND_ALL_AVAILABLE_GAMERS,
            Self::InviteGamer { .. } => events::INVITE_GAMER,
            Self::DeclineGame { .. } => events::DECLINE_GAME,
            Self::AcceptGame { .. } => events::ACCEPT_GAME,
            Self::PlaceMarker { .. } => events::PLACE_MARKER,
            Self::SendMessage { .. } => events::SEND_MESSAGE,
        }
    }

    /// Whether the request requires an authenticated session. Everything
    /// except register and login does.
    pub fn requires_authentication(&self) -> bool {
        !matches!(self, Self::Register { .. } | Self::Login { .. })
    }
}
