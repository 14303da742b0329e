//! Chat endpoints.
//!
//! - `POST /chat` -- raw JSON body in, envelope rendered as the HTTP response
//! - `POST /invoke` -- proxy event in, envelope returned as a JSON document
//!
//! Both delegate to `ChatService::handle`, which never fails; a body that
//! is not valid UTF-8 (or not valid base64 for an encoded proxy event) is
//! answered with the generic 500 envelope.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::Engine;

use lexbridge_core::repository::history::ChatHistoryStore;
use lexbridge_core::repository::intent::IntentResolver;
use lexbridge_types::chat::INTERNAL_ERROR;
use lexbridge_types::envelope::{ProxyEvent, ResponseEnvelope};

use crate::http::response::EnvelopeResponse;
use crate::state::AppState;

/// POST /chat
pub async fn chat<R, H>(State(state): State<AppState<R, H>>, body: Bytes) -> Response
where
    R: IntentResolver + 'static,
    H: ChatHistoryStore + 'static,
{
    let envelope = match std::str::from_utf8(&body) {
        Ok(text) if text.trim().is_empty() => state.chat.handle(None).await,
        Ok(text) => state.chat.handle(Some(text)).await,
        Err(e) => internal_error(&format!("request body is not UTF-8: {e}")),
    };

    EnvelopeResponse(envelope).into_response()
}

/// POST /invoke
///
/// Mirrors a serverless proxy integration: the HTTP status is always 200 and
/// the envelope (with its own `statusCode`) is the payload.
pub async fn invoke<R, H>(
    State(state): State<AppState<R, H>>,
    body: Bytes,
) -> Json<ResponseEnvelope>
where
    R: IntentResolver + 'static,
    H: ChatHistoryStore + 'static,
{
    let event = match serde_json::from_slice::<ProxyEvent>(&body) {
        Ok(event) => event,
        Err(e) => return Json(internal_error(&format!("invalid proxy event: {e}"))),
    };

    let envelope = match decode_body(&event) {
        Ok(body) => state.chat.handle(body.as_deref()).await,
        Err(reason) => internal_error(&reason),
    };

    Json(envelope)
}

/// Extract the event body, decoding it when flagged as base64.
fn decode_body(event: &ProxyEvent) -> Result<Option<String>, String> {
    let Some(body) = &event.body else {
        return Ok(None);
    };
    if !event.is_base64_encoded {
        return Ok(Some(body.clone()));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(body)
        .map_err(|e| format!("invalid base64 body: {e}"))?;
    String::from_utf8(bytes)
        .map(Some)
        .map_err(|e| format!("decoded body is not UTF-8: {e}"))
}

fn internal_error(reason: &str) -> ResponseEnvelope {
    tracing::error!(error = %reason, "Internal Server Error");
    ResponseEnvelope::error(500, INTERNAL_ERROR)
}
