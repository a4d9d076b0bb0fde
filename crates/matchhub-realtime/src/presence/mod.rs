//! Gamer presence: the availability directory and the TTL sweeper.

pub mod directory;
pub mod sweeper;

pub use directory::GamerDirectory;
pub use sweeper::PresenceSweeper;
