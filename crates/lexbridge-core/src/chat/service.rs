//! Chat service driving one request from raw body to response envelope.
//!
//! The pipeline is strictly linear:
//! parse -> validate -> derive ids -> resolve intent -> extract reply
//! -> persist history (best-effort) -> respond.
//!
//! ChatService is generic over the [`IntentResolver`] and
//! [`ChatHistoryStore`] ports so the binary can pin it to the AWS
//! implementations while tests substitute fakes.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use lexbridge_types::chat::{ChatReply, ChatRequest, INTERNAL_ERROR, MISSING_MESSAGE};
use lexbridge_types::envelope::ResponseEnvelope;
use lexbridge_types::error::{BridgeError, StoreError};
use lexbridge_types::history::ChatHistoryRecord;
use lexbridge_types::intent::{DEFAULT_LOCALE, RecognizeText};

use crate::repository::history::ChatHistoryStore;
use crate::repository::intent::IntentResolver;

/// The bot every recognition call is addressed to. Fixed for the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotTarget {
    pub bot_id: String,
    pub bot_alias_id: String,
    pub locale_id: String,
}

impl BotTarget {
    /// Target a bot alias in the default `en_US` locale.
    pub fn new(bot_id: impl Into<String>, bot_alias_id: impl Into<String>) -> Self {
        Self {
            bot_id: bot_id.into(),
            bot_alias_id: bot_alias_id.into(),
            locale_id: DEFAULT_LOCALE.to_string(),
        }
    }

    pub fn with_locale(mut self, locale_id: impl Into<String>) -> Self {
        self.locale_id = locale_id.into();
        self
    }
}

/// Orchestrates a single chat exchange.
///
/// Holds no per-request state, so one instance serves any number of
/// concurrent requests.
pub struct ChatService<R: IntentResolver, H: ChatHistoryStore> {
    resolver: R,
    history: H,
    target: BotTarget,
}

impl<R: IntentResolver, H: ChatHistoryStore> ChatService<R, H> {
    pub fn new(resolver: R, history: H, target: BotTarget) -> Self {
        Self {
            resolver,
            history,
            target,
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn target(&self) -> &BotTarget {
        &self.target
    }

    /// Handle one inbound event body and always produce an envelope.
    ///
    /// - 200 with the reply on success (including when a recognized
    ///   persistence failure was swallowed).
    /// - 400 when `message` is missing or empty.
    /// - 500 with a generic message for everything else; details are only
    ///   logged.
    pub async fn handle(&self, body: Option<&str>) -> ResponseEnvelope {
        info!(body = body.unwrap_or_default(), "Received chat event");

        match self.process(body).await {
            Ok(reply) => ResponseEnvelope::json(200, &reply),
            Err(BridgeError::MissingMessage) => {
                warn!("Rejected chat request without a message");
                ResponseEnvelope::error(400, MISSING_MESSAGE)
            }
            Err(e) => {
                error!(error = %e, detail = ?e, "Internal Server Error");
                ResponseEnvelope::error(500, INTERNAL_ERROR)
            }
        }
    }

    /// Run the pipeline, surfacing the first fatal error.
    pub async fn process(&self, body: Option<&str>) -> Result<ChatReply, BridgeError> {
        let request = parse_request(body)?;

        let message = message_text(request.message)?;

        // Generated independently: a missing chat id never reuses the session id.
        let session_id = session_id_or_generated(request.session_id);
        let chat_id = request.chat_id.unwrap_or_else(generate_id);

        let recognize = RecognizeText {
            bot_id: self.target.bot_id.clone(),
            bot_alias_id: self.target.bot_alias_id.clone(),
            locale_id: self.target.locale_id.clone(),
            session_id: session_id.clone(),
            text: message.clone(),
        };

        let resolution = self.resolver.recognize_text(&recognize).await?;

        let reply_text = resolution.reply_text();
        let intent = resolution.intent_name().to_string();

        let record = ChatHistoryRecord::new(
            session_id.clone(),
            chat_id.clone(),
            message,
            reply_text.clone(),
            intent.clone(),
            Utc::now().timestamp(),
        );
        self.persist(&record).await?;

        Ok(ChatReply {
            session_id,
            chat_id,
            message: reply_text,
            intent,
        })
    }

    /// Write the history record, swallowing recognized store failures.
    ///
    /// Any other failure is returned and ends the request with a 500.
    async fn persist(&self, record: &ChatHistoryRecord) -> Result<(), StoreError> {
        match self.history.put_record(record).await {
            Ok(()) => {
                debug!(
                    session_id = %record.session_id,
                    timestamp = record.timestamp,
                    "Chat history persisted"
                );
                Ok(())
            }
            Err(e) if e.is_recognized() => {
                error!(
                    session_id = %record.session_id,
                    error = %e,
                    "Failed to persist chat history"
                );
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

/// Decode the raw body. An absent body counts as an empty object.
pub fn parse_request(body: Option<&str>) -> Result<ChatRequest, BridgeError> {
    let Some(body) = body else {
        return Ok(ChatRequest::default());
    };

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| BridgeError::InvalidBody(e.to_string()))?;
    if !value.is_object() {
        return Err(BridgeError::InvalidBody(
            "expected a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| BridgeError::InvalidBody(e.to_string()))
}

/// Extract the user's text. Falsy JSON values count as missing.
fn message_text(message: Option<Value>) -> Result<String, BridgeError> {
    match message {
        Some(Value::String(text)) if !text.is_empty() => Ok(text),
        Some(value) if !is_falsy(&value) => Err(BridgeError::InvalidBody(format!(
            "message must be a string, got {value}"
        ))),
        _ => Err(BridgeError::MissingMessage),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Keep a non-empty client session id, otherwise mint one. The runtime
/// API rejects an empty session id.
fn session_id_or_generated(provided: Option<String>) -> String {
    provided
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_id)
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
