//! Game sessions: turn-enforced move application and chat.

pub mod service;

pub use service::{GameService, MovePayload};
