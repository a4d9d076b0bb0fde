//! # matchhub-database
//!
//! PostgreSQL persistence layer for MatchHub: connection pool management,
//! the migration runner, and the concrete repositories implementing the
//! storage-collaborator traits from `matchhub-entity`.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
