//! # matchhub-board
//!
//! Pure board evaluation engine for MatchHub. No I/O, no shared state —
//! every function is deterministic and safe to call from any task.
//!
//! The win rule is the game's actual rule, not a generic k-in-a-row
//! search: a move wins iff the full row, the full column, or one of the
//! two main diagonals is uniform in the mover's marker. Diagonals other
//! than the two main ones are never considered.

mod board;
mod marker;

pub use board::{Board, Cell, DEFAULT_BOARD_SIZE};
pub use marker::Marker;
