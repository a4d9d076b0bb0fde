//! Match coordination: the invite → accept/decline handshake.

pub mod coordinator;

pub use coordinator::{InvitePayload, MatchCoordinator};
