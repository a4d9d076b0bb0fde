//! The uniform success/error envelope delivered on every event.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope wrapping every delivered message:
/// `{event, ok, result?, isError?, error?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Event name this message belongs to.
    pub event: String,
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Success payload, when the event carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Present and `true` only on error envelopes.
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
    /// Error message text, present only on error envelopes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// A success envelope with no payload.
    pub fn success(event: &str) -> Self {
        Self {
            event: event.to_string(),
            ok: true,
            result: None,
            is_error: None,
            error: None,
        }
    }

    /// A success envelope carrying a payload.
    pub fn with_result(event: &str, result: &impl Serialize) -> Self {
        Self {
            event: event.to_string(),
            ok: true,
            result: Some(serde_json::to_value(result).unwrap_or(Value::Null)),
            is_error: None,
            error: None,
        }
    }

    /// An error envelope.
    pub fn error(event: &str, message: impl Into<String>) -> Self {
        Self {
            event: event.to_string(),
            ok: false,
            result: None,
            is_error: Some(true),
            error: Some(message.into()),
        }
    }

    /// Serialize for the wire.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
