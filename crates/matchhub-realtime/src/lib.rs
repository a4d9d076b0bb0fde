//! # matchhub-realtime
//!
//! Realtime game-coordination core for MatchHub. Provides:
//!
//! - Session registry mapping session ids to live connections
//! - The `{event, ok, result, isError, error}` message envelope protocol
//! - Gamer directory (presence listing with lazy liveness refresh)
//! - The invite → accept/decline match handshake
//! - Turn-enforced game sessions with win/draw detection and chat
//! - TTL-based presence sweeping
//!
//! Every inbound event is an independent unit of work; the only
//! serialization point between connections is the storage layer's
//! conditional turn update.

pub mod connection;
pub mod game;
pub mod hub;
pub mod login;
pub mod matchmaking;
pub mod message;
pub mod presence;
pub mod session;

pub use connection::ConnectionHandle;
pub use game::GameService;
pub use hub::GameHub;
pub use matchmaking::MatchCoordinator;
pub use message::{ClientRequest, Envelope};
pub use presence::{GamerDirectory, PresenceSweeper};
pub use session::SessionRegistry;
