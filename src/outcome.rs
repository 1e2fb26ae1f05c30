//! Tagged-variant results for tool operations
//!
//! Every tool call resolves to an [`Outcome`]: success, a legitimately empty
//! result, or a degraded state the caller must be able to tell apart from
//! both. Upstream trouble is data, not a fault, so the three non-success
//! states stay exhaustively checkable while the hosting transport still
//! receives the conventional sentinel-field JSON it expects.

use serde::Serialize;
use serde_json::{Value, json};

/// Failure categories a tool operation can degrade to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The lookup produced zero matches
    NotFound,
    /// An outbound call failed, timed out, or returned a non-success status
    UpstreamUnavailable,
    /// The upstream answered but the expected fields were absent
    MalformedResponse,
}

/// Result of a tool operation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The operation produced the full payload
    Ok(T),
    /// A valid response that legitimately contains zero items
    Empty { message: String },
    /// The operation degraded; no partial payload accompanies it
    Error { kind: ErrorKind, message: String },
}

impl<T> Outcome<T> {
    /// Create an empty outcome with an explanatory message
    pub fn empty<S: Into<String>>(message: S) -> Self {
        Self::Empty {
            message: message.into(),
        }
    }

    /// Create an error outcome
    pub fn error<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self::Error {
            kind,
            message: message.into(),
        }
    }

    /// Whether this outcome carries the full payload
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }
}

impl<T: Serialize> Outcome<T> {
    /// Render the outcome in the sentinel-field convention of the tool
    /// transport: the payload itself on success, `{"message": ...}` for an
    /// empty result, `{"error": ..., "kind": ...}` for a degraded one.
    /// Payload fields and error markers never mix.
    #[must_use]
    pub fn to_wire(&self) -> Value {
        match self {
            Outcome::Ok(data) => serde_json::to_value(data)
                .unwrap_or_else(|_| json!({ "error": "Internal serialization failure." })),
            Outcome::Empty { message } => json!({ "message": message }),
            Outcome::Error { kind, message } => json!({ "error": message, "kind": kind }),
        }
    }

    /// JSON-encoded string form handed to the tool transport
    #[must_use]
    pub fn to_wire_string(&self) -> String {
        self.to_wire().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Debug, PartialEq, Clone)]
    struct Payload {
        value: u32,
    }

    #[test]
    fn test_ok_serializes_payload_only() {
        let outcome = Outcome::Ok(Payload { value: 7 });
        let wire = outcome.to_wire();
        assert_eq!(wire, json!({ "value": 7 }));
        assert!(wire.get("error").is_none());
        assert!(wire.get("message").is_none());
    }

    #[test]
    fn test_empty_carries_message_key() {
        let outcome: Outcome<Payload> = Outcome::empty("No active alerts for this state.");
        let wire = outcome.to_wire();
        assert_eq!(wire["message"], "No active alerts for this state.");
        assert!(wire.get("error").is_none());
    }

    #[test]
    fn test_error_carries_error_key_and_kind() {
        let outcome: Outcome<Payload> =
            Outcome::error(ErrorKind::UpstreamUnavailable, "Unable to fetch alerts.");
        let wire = outcome.to_wire();
        assert_eq!(wire["error"], "Unable to fetch alerts.");
        assert_eq!(wire["kind"], "upstream_unavailable");
        assert!(wire.get("message").is_none());
    }

    #[test]
    fn test_wire_string_is_json() {
        let outcome = Outcome::Ok(Payload { value: 1 });
        let parsed: Value = serde_json::from_str(&outcome.to_wire_string()).unwrap();
        assert_eq!(parsed["value"], 1);
    }

    #[test]
    fn test_is_ok() {
        assert!(Outcome::Ok(Payload { value: 0 }).is_ok());
        assert!(!Outcome::<Payload>::empty("nothing").is_ok());
        assert!(!Outcome::<Payload>::error(ErrorKind::NotFound, "gone").is_ok());
    }
}
