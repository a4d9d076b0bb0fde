//! Unified application error types for MatchHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Game-protocol failures carry an
//! [`ErrorKind`] from the coordination taxonomy so handlers can shape the
//! right envelope; storage failures keep the collaborator's message text.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The caller's session is not authenticated.
    NotAuthenticated,
    /// The targeted peer has no live connection.
    PeerUnavailable,
    /// A move was attempted out of turn.
    NotYourTurn,
    /// The targeted board cell is already occupied.
    AlreadyOccupied,
    /// The requested resource (game, user) was not found.
    NotFound,
    /// The resource already exists (duplicate registration).
    AlreadyExists,
    /// The gamer records for a game pairing could not be located.
    PlayersNotFound,
    /// Input validation failed (empty required field, out-of-range move).
    Validation,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "NOT_AUTHENTICATED"),
            Self::PeerUnavailable => write!(f, "PEER_UNAVAILABLE"),
            Self::NotYourTurn => write!(f, "NOT_YOUR_TURN"),
            Self::AlreadyOccupied => write!(f, "ALREADY_OCCUPIED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::AlreadyExists => write!(f, "ALREADY_EXISTS"),
            Self::PlayersNotFound => write!(f, "PLAYERS_NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout MatchHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. The `message` is the text delivered to
/// clients in error envelopes, so taxonomy errors keep it human-readable
/// and storage errors keep the collaborator's own wording.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-authenticated error.
    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotAuthenticated, message)
    }

    /// Create a peer-unavailable error.
    pub fn peer_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PeerUnavailable, message)
    }

    /// Create a not-your-turn error.
    pub fn not_your_turn(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotYourTurn, message)
    }

    /// Create an already-occupied error.
    pub fn already_occupied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyOccupied, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an already-exists error.
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyExists, message)
    }

    /// Create a players-not-found error.
    pub fn players_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PlayersNotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// The text delivered to clients in an error envelope.
    pub fn client_message(&self) -> &str {
        &self.message
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
