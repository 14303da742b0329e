//! Uniform response envelope and the proxy event it answers.
//!
//! Every code path of the chat handler ends in a [`ResponseEnvelope`]:
//! ```json
//! {
//!   "statusCode": 200,
//!   "headers": { "Content-Type": "application/json", "Access-Control-Allow-Origin": "*" },
//!   "body": "{\"sessionId\":\"...\",\"chatId\":\"...\",\"message\":\"...\",\"intent\":\"...\"}"
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chat::{ErrorBody, INTERNAL_ERROR};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";

/// Status code, fixed headers and a JSON-encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON document encoded as a string.
    pub body: String,
}

impl ResponseEnvelope {
    /// Build an envelope around any serializable body.
    ///
    /// If the body cannot be encoded the envelope degrades to a 500 carrying
    /// the generic error text, so callers always get a well-formed response.
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self::raw(status_code, body),
            Err(_) => Self::raw(
                500,
                format!(r#"{{"error":"{INTERNAL_ERROR}"}}"#),
            ),
        }
    }

    /// Build an error envelope with `{"error": message}`.
    pub fn error(status_code: u16, message: &str) -> Self {
        Self::json(status_code, &ErrorBody::new(message))
    }

    fn raw(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        headers.insert(ALLOW_ORIGIN.to_string(), "*".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Minimal API-Gateway-proxy-shaped inbound event.
///
/// Only the body matters to the chat handler; every other field of a real
/// proxy event is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}
