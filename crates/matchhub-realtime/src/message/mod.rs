//! Message envelope protocol and inbound request parsing.

pub mod envelope;
pub mod inbound;

pub use envelope::Envelope;
pub use inbound::ClientRequest;

/// Event names used on the wire.
///
/// Requests and their direct responses share a name; notifications pushed
/// to the counterpart use their own (`gameInvite`, `gameMove`, ...).
pub mod events {
    /// Sent to a fresh connection with its session id.
    pub const INIT: &str = "init";
    /// Registration request/response.
    pub const REGISTER: &str = "register";
    /// Login request/response.
    pub const LOGIN: &str = "login";
    /// Broadcast to everyone else on a successful authentication.
    pub const GAMER_JOINED: &str = "gamerJoined";
    /// Directory listing request/response.
    pub const FIND_ALL_AVAILABLE_GAMERS: &str = "findAllAvailableGamers";
    /// Invite request; also the channel carrying decline/accept outcomes
    /// back to the inviter.
    pub const INVITE_GAMER: &str = "inviteGamer";
    /// Invite notification delivered to the invitee.
    pub const GAME_INVITE: &str = "gameInvite";
    /// Decline request.
    pub const DECLINE_GAME: &str = "declineGame";
    /// Accept request/response.
    pub const ACCEPT_GAME: &str = "acceptGame";
    /// Move request/response to the mover.
    pub const PLACE_MARKER: &str = "placeMarker";
    /// Accepted move notification to the opponent.
    pub const GAME_MOVE: &str = "gameMove";
    /// Terminal game notification to both players.
    pub const GAME_OVER: &str = "gameOver";
    /// Chat send request/ack.
    pub const SEND_MESSAGE: &str = "sendMessage";
    /// Chat delivery to the opponent.
    pub const CHAT_MESSAGE: &str = "chatMessage";
    /// Catch-all for frames that could not be parsed.
    pub const ERROR: &str = "error";
}
