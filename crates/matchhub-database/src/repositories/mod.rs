//! Concrete PostgreSQL repositories.

pub mod game;
pub mod gamer;
pub mod user;

pub use game::GameRepository;
pub use gamer::GamerRepository;
pub use user::UserRepository;
