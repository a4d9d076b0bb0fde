//! Player markers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the two symbols placed on the board.
///
/// Marker assignment is fixed for a game's lifetime: the starting player
/// is always `X`, the other player always `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// The starting player's marker.
    X,
    /// The second player's marker.
    O,
}

impl Marker {
    /// The wire/document representation of this marker.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::O => "o",
        }
    }

    /// The opposing marker.
    pub fn opponent(&self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    /// Parse a marker from its document representation.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "x" => Some(Self::X),
            "o" => Some(Self::O),
            _ => None,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Marker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Marker {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Marker::from_str_opt(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid marker: {s:?}")))
    }
}
