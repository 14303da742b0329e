//! Inbound chat request and outbound reply bodies.
//!
//! Field names follow the wire format used by web clients (`sessionId`,
//! `chatId`), so both types rename to camelCase.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error text returned when the request carries no usable `message`.
pub const MISSING_MESSAGE: &str = "Message field is required";

/// Generic error text for every 500 response. Details only go to the logs.
pub const INTERNAL_ERROR: &str = "Internal Server Error processing chat request";

/// Chat request as sent by the client. Untrusted.
///
/// All fields are optional at the decoding stage; presence of `message` is
/// checked by the chat service so that a missing message produces a 400
/// rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Kept as raw JSON: any falsy value (`null`, `false`, `0`, `""`, `[]`,
    /// `{}`) counts as a missing message, not a malformed body.
    #[serde(default)]
    pub message: Option<Value>,
    /// Conversation session to continue. A fresh one is generated when absent.
    #[serde(default)]
    pub session_id: Option<String>,
    /// UI grouping identifier, orthogonal to the session.
    #[serde(default)]
    pub chat_id: Option<String>,
}

/// Successful reply to a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub session_id: String,
    pub chat_id: String,
    /// Plain-text reply assembled from the backend's message fragments.
    /// May be empty.
    pub message: String,
    /// Resolved intent name, or `"Unknown"`.
    pub intent: String,
}

/// Body of every non-200 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_fields() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"message": "hi", "sessionId": "s-1", "chatId": "c-1"}"#,
        )
        .unwrap();
        assert_eq!(req.message, Some(Value::from("hi")));
        assert_eq!(req.session_id.as_deref(), Some("s-1"));
        assert_eq!(req.chat_id.as_deref(), Some("c-1"));
    }

    #[test]
    fn test_request_ignores_unknown_fields() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message": "hi", "locale": "fr_FR"}"#).unwrap();
        assert_eq!(req.message, Some(Value::from("hi")));
        assert!(req.session_id.is_none());
    }

    #[test]
    fn test_reply_serializes_wire_names() {
        let reply = ChatReply {
            session_id: "s".to_string(),
            chat_id: "c".to_string(),
            message: "Hello".to_string(),
            intent: "WelcomeIntent".to_string(),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["sessionId"], "s");
        assert_eq!(json["chatId"], "c");
        assert_eq!(json["message"], "Hello");
        assert_eq!(json["intent"], "WelcomeIntent");
    }

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_string(&ErrorBody::new(MISSING_MESSAGE)).unwrap();
        assert_eq!(body, r#"{"error":"Message field is required"}"#);
    }
}
