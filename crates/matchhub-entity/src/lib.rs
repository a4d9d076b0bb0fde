//! # matchhub-entity
//!
//! Domain entity models for MatchHub (users, gamer presence records, game
//! documents) plus the storage-collaborator traits the realtime core is
//! written against. Concrete PostgreSQL implementations live in
//! `matchhub-database`; tests substitute in-memory implementations.

pub mod game;
pub mod gamer;
pub mod store;
pub mod user;

pub use game::{ChatEntry, Game, GameState};
pub use gamer::Gamer;
pub use store::{GameStore, GamerStore, UserStore};
pub use user::{NewUser, User};
