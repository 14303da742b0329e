//! Intent-resolution request and result types.
//!
//! These mirror the Lex V2 runtime `RecognizeText` shapes closely enough to
//! deserialize real responses, while only the pieces the bridge consumes are
//! strongly typed. Anything else in the payload is ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Intent name reported when the backend resolves none.
pub const UNKNOWN_INTENT: &str = "Unknown";

/// Locale every recognition request is sent with.
pub const DEFAULT_LOCALE: &str = "en_US";

/// One recognition call: which bot to ask, in which session, and what was said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizeText {
    pub bot_id: String,
    pub bot_alias_id: String,
    pub locale_id: String,
    pub session_id: String,
    pub text: String,
}

/// Content kind of a reply fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    PlainText,
    CustomPayload,
    ImageResponseCard,
    #[serde(rename = "SSML")]
    Ssml,
    /// Any kind this bridge does not know about.
    #[serde(other)]
    Other,
}

/// A single reply fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    pub content_type: ContentType,
    /// Text content. Absent for rich kinds such as response cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ResponseMessage {
    pub fn plain_text(content: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::PlainText,
            content: Some(content.into()),
        }
    }
}

/// Next step the bot takes in the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogAction {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Intent as tracked by the backend session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Backend-owned session state returned alongside the reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_action: Option<DialogAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub session_attributes: BTreeMap<String, String>,
}

/// Result of a recognition call. Read-only to the bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResolution {
    #[serde(default)]
    pub messages: Vec<ResponseMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_state: Option<SessionState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Ranked candidate intents, kept opaque.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interpretations: Vec<serde_json::Value>,
}

impl IntentResolution {
    /// Plain-text fragments joined with a single space, in backend order.
    ///
    /// Returns an empty string when there are no plain-text fragments.
    pub fn reply_text(&self) -> String {
        self.messages
            .iter()
            .filter(|m| m.content_type == ContentType::PlainText)
            .map(|m| m.content.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Resolved intent name, or [`UNKNOWN_INTENT`].
    pub fn intent_name(&self) -> &str {
        self.session_state
            .as_ref()
            .and_then(|s| s.intent.as_ref())
            .and_then(|i| i.name.as_deref())
            .unwrap_or(UNKNOWN_INTENT)
    }
}
