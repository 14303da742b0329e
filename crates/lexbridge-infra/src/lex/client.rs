//! LexRuntimeClient -- [`IntentResolver`] backed by the Lex V2 runtime API.
//!
//! Calls `RecognizeText`:
//! `POST /bots/{botId}/botAliases/{botAliasId}/botLocales/{localeId}/sessions/{sessionId}/text`
//! with a SigV4-signed JSON body `{"text": "..."}`.
//!
//! No retries and no client-side timeout beyond what the shared
//! `reqwest::Client` was built with.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use lexbridge_core::repository::intent::IntentResolver;
use lexbridge_types::error::IntentError;
use lexbridge_types::intent::{IntentResolution, RecognizeText};

use crate::aws::sigv4::{PostRequest, SigningContext, encode_path, sign_post};
use crate::aws::{AwsCredentials, Endpoint};

/// Body of a `RecognizeText` call. Session state is left to the bot.
#[derive(Debug, Serialize)]
struct RecognizeTextBody<'a> {
    text: &'a str,
}

/// Lex V2 runtime client.
pub struct LexRuntimeClient {
    http: reqwest::Client,
    credentials: Arc<AwsCredentials>,
    region: String,
    endpoint: Endpoint,
}

impl LexRuntimeClient {
    /// Signing name of the Lex runtime service.
    const SERVICE: &'static str = "lex";

    /// Host prefix of the regional runtime endpoint.
    pub const ENDPOINT_PREFIX: &'static str = "runtime-v2-lex";

    pub fn new(
        http: reqwest::Client,
        credentials: Arc<AwsCredentials>,
        region: String,
        endpoint: Option<Endpoint>,
    ) -> Self {
        let endpoint =
            endpoint.unwrap_or_else(|| Endpoint::regional(Self::ENDPOINT_PREFIX, &region));
        Self {
            http,
            credentials,
            region,
            endpoint,
        }
    }

    /// Wire path of the `RecognizeText` operation for a request.
    fn path(request: &RecognizeText) -> String {
        encode_path(&[
            "bots",
            &request.bot_id,
            "botAliases",
            &request.bot_alias_id,
            "botLocales",
            &request.locale_id,
            "sessions",
            &request.session_id,
            "text",
        ])
    }
}

// Like the credentials it holds, the client does not derive Debug.

impl IntentResolver for LexRuntimeClient {
    async fn recognize_text(
        &self,
        request: &RecognizeText,
    ) -> Result<IntentResolution, IntentError> {
        let path = Self::path(request);
        let url = self.endpoint.url(&path);
        let payload = serde_json::to_vec(&RecognizeTextBody {
            text: &request.text,
        })
        .map_err(|e| IntentError::Transport(format!("failed to encode request: {e}")))?;

        let signed = sign_post(
            &SigningContext {
                credentials: &self.credentials,
                region: &self.region,
                service: Self::SERVICE,
                time: Utc::now(),
            },
            &PostRequest {
                host: self.endpoint.host(),
                path: &path,
                headers: &[("content-type", "application/json")],
                payload: &payload,
            },
        );

        tracing::debug!(url = %url, session_id = %request.session_id, "Lex RecognizeText request");

        let mut builder = self
            .http
            .post(&url)
            .header("content-type", "application/json");
        for (name, value) in signed.pairs() {
            builder = builder.header(name, value);
        }

        let response = builder
            .body(payload)
            .send()
            .await
            .map_err(|e| IntentError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %error_body, url = %url, "Lex API error response");
            return Err(classify_error(status.as_u16(), &error_body));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| IntentError::Transport(format!("failed to read response: {e}")))?;
        decode_resolution(&request.session_id, &raw)
    }
}

/// Log the response exactly as the runtime sent it, then decode the parts
/// the bridge uses.
fn decode_resolution(session_id: &str, raw: &str) -> Result<IntentResolution, IntentError> {
    tracing::info!(session_id = %session_id, response = %raw, "Lex RecognizeText response");

    serde_json::from_str(raw)
        .map_err(|e| IntentError::Deserialization(format!("failed to parse response: {e}")))
}

/// Map an error response from the runtime API to an [`IntentError`].
fn classify_error(status: u16, body: &str) -> IntentError {
    let message = error_message(body);
    match status {
        401 | 403 => IntentError::AuthenticationFailed(message),
        429 => IntentError::Throttled(message),
        _ => IntentError::Service { status, message },
    }
}

/// Lex error bodies look like `{"message": "..."}`; fall back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("Message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
