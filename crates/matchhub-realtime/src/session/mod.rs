//! Session registry.

pub mod registry;

pub use registry::{SessionRegistry, SessionState};
