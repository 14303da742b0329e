//! Persisted chat history record.

use serde::{Deserialize, Serialize};

/// Retention window for history records: 90 days, in seconds.
pub const RETENTION_SECS: i64 = 90 * 86_400;

/// One request/reply exchange as written to the history table.
///
/// Keyed by `(session_id, timestamp)`: the session is the partition key and
/// the whole-second timestamp orders records within a session. Two writes
/// for the same session in the same second share a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryRecord {
    pub session_id: String,
    /// Epoch seconds.
    pub timestamp: i64,
    pub chat_id: String,
    pub user_message: String,
    pub bot_response: String,
    pub intent_name: String,
    /// Epoch seconds after which the store may expire the record.
    #[serde(rename = "ttl")]
    pub expires_at: i64,
}

impl ChatHistoryRecord {
    /// Build a record stamped at `timestamp`, expiring [`RETENTION_SECS`] later.
    pub fn new(
        session_id: impl Into<String>,
        chat_id: impl Into<String>,
        user_message: impl Into<String>,
        bot_response: impl Into<String>,
        intent_name: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp,
            chat_id: chat_id.into(),
            user_message: user_message.into(),
            bot_response: bot_response.into(),
            intent_name: intent_name.into(),
            expires_at: timestamp + RETENTION_SECS,
        }
    }
}
