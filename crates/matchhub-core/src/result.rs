//! Application result alias.

use crate::error::AppError;

/// Result alias used throughout the MatchHub crates.
pub type AppResult<T> = Result<T, AppError>;
