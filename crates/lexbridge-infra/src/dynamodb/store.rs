//! DynamoDbHistoryStore -- [`ChatHistoryStore`] backed by a DynamoDB table.
//!
//! Issues `PutItem` over the JSON 1.0 protocol. Any error response from the
//! service (throttling, missing table, validation, conditional failures) is
//! reported as [`StoreError::Rejected`], the recognized storage-layer
//! failure. A request that never got an answer is [`StoreError::Transport`].

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Value, json};

use lexbridge_core::repository::history::ChatHistoryStore;
use lexbridge_types::error::StoreError;
use lexbridge_types::history::ChatHistoryRecord;

use super::item::to_item;
use crate::aws::sigv4::{PostRequest, SigningContext, sign_post};
use crate::aws::{AwsCredentials, Endpoint};

/// DynamoDB-backed chat history table.
pub struct DynamoDbHistoryStore {
    http: reqwest::Client,
    credentials: Arc<AwsCredentials>,
    region: String,
    endpoint: Endpoint,
    table_name: String,
}

impl DynamoDbHistoryStore {
    const SERVICE: &'static str = "dynamodb";
    const CONTENT_TYPE: &'static str = "application/x-amz-json-1.0";
    const PUT_ITEM_TARGET: &'static str = "DynamoDB_20120810.PutItem";

    /// Host prefix of the regional endpoint.
    pub const ENDPOINT_PREFIX: &'static str = "dynamodb";

    pub fn new(
        http: reqwest::Client,
        credentials: Arc<AwsCredentials>,
        region: String,
        endpoint: Option<Endpoint>,
        table_name: String,
    ) -> Self {
        let endpoint =
            endpoint.unwrap_or_else(|| Endpoint::regional(Self::ENDPOINT_PREFIX, &region));
        Self {
            http,
            credentials,
            region,
            endpoint,
            table_name,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn put_item_body(&self, record: &ChatHistoryRecord) -> Value {
        json!({
            "TableName": self.table_name,
            "Item": to_item(record),
        })
    }
}

impl ChatHistoryStore for DynamoDbHistoryStore {
    async fn put_record(&self, record: &ChatHistoryRecord) -> Result<(), StoreError> {
        let payload = serde_json::to_vec(&self.put_item_body(record))
            .map_err(|e| StoreError::Encoding(e.to_string()))?;

        let signed = sign_post(
            &SigningContext {
                credentials: &self.credentials,
                region: &self.region,
                service: Self::SERVICE,
                time: Utc::now(),
            },
            &PostRequest {
                host: self.endpoint.host(),
                path: "/",
                headers: &[
                    ("content-type", Self::CONTENT_TYPE),
                    ("x-amz-target", Self::PUT_ITEM_TARGET),
                ],
                payload: &payload,
            },
        );

        let url = self.endpoint.url("/");
        tracing::debug!(
            url = %url,
            table = %self.table_name,
            session_id = %record.session_id,
            "DynamoDB PutItem request"
        );

        let mut builder = self
            .http
            .post(&url)
            .header("content-type", Self::CONTENT_TYPE)
            .header("x-amz-target", Self::PUT_ITEM_TARGET);
        for (name, value) in signed.pairs() {
            builder = builder.header(name, value);
        }

        let response = builder
            .body(payload)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let error_body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, body = %error_body, "DynamoDB API error response");
        Err(rejection(status.as_u16(), &error_body))
    }
}

/// Turn a DynamoDB error response into [`StoreError::Rejected`].
///
/// Error bodies look like
/// `{"__type": "com.amazonaws.dynamodb.v20120810#ResourceNotFoundException", "message": "..."}`.
/// The code is the part after `#`; without a parseable body it is `HTTP<status>`.
fn rejection(status: u16, body: &str) -> StoreError {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(|v| v.as_str())
            .map(str::to_string)
    };

    let code = field("__type")
        .map(|t| t.rsplit('#').next().unwrap_or_default().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| format!("HTTP{status}"));
    let message = field("message")
        .or_else(|| field("Message"))
        .unwrap_or_else(|| body.to_string());

    StoreError::Rejected { code, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store(endpoint: Option<Endpoint>) -> DynamoDbHistoryStore {
        DynamoDbHistoryStore::new(
            reqwest::Client::new(),
            Arc::new(AwsCredentials::new("AKIDEXAMPLE", "secret", None)),
            "us-east-1".to_string(),
            endpoint,
            "chat-history".to_string(),
        )
    }

    #[test]
    fn test_put_item_body() {
        let store = make_store(None);
        let record = ChatHistoryRecord::new("s-1", "c-1", "hi", "Hello", "WelcomeIntent", 100);
        let body = store.put_item_body(&record);

        assert_eq!(body["TableName"], "chat-history");
        assert_eq!(body["Item"]["sessionId"]["S"], "s-1");
        assert_eq!(body["Item"]["timestamp"]["N"], "100");
    }

    #[test]
    fn test_default_endpoint_is_regional() {
        let store = make_store(None);
        assert_eq!(store.endpoint.host(), "dynamodb.us-east-1.amazonaws.com");
        assert_eq!(store.table_name(), "chat-history");
    }

    #[test]
    fn test_rejection_extracts_code_and_message() {
        let err = rejection(
            400,
            r#"{"__type":"com.amazonaws.dynamodb.v20120810#ResourceNotFoundException","message":"Requested resource not found"}"#,
        );
        assert!(err.is_recognized());
        match err {
            StoreError::Rejected { code, message } => {
                assert_eq!(code, "ResourceNotFoundException");
                assert_eq!(message, "Requested resource not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejection_without_json_body() {
        match rejection(503, "Service Unavailable") {
            StoreError::Rejected { code, message } => {
                assert_eq!(code, "HTTP503");
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_not_recognized() {
        let endpoint = Endpoint::parse("DYNAMODB_ENDPOINT_URL", "http://127.0.0.1:9").unwrap();
        let store = make_store(Some(endpoint));
        let record = ChatHistoryRecord::new("s-1", "c-1", "hi", "Hello", "WelcomeIntent", 100);

        let err = store.put_record(&record).await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
        assert!(!err.is_recognized());
    }
}
