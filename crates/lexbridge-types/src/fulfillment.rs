//! Fulfillment code-hook event and response shapes.
//!
//! The intent-resolution backend calls a code hook when an intent is ready
//! to be fulfilled. The hook answers with the next dialog action, the
//! updated session state and the messages to show the user.

use serde::{Deserialize, Serialize};

use crate::intent::{ResponseMessage, SessionState};

/// Inbound code-hook invocation. Only the session state is consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeHookEvent {
    #[serde(default)]
    pub session_state: SessionState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Code-hook reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeHookResponse {
    pub session_state: SessionState,
    pub messages: Vec<ResponseMessage>,
}
