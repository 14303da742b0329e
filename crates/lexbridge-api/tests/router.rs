//! Router tests for the lexbridge HTTP front door.
//!
//! Each test builds the real router over in-memory fakes of the intent
//! resolver and history store, and drives it with `tower::ServiceExt::oneshot`.

use std::sync::Mutex;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use lexbridge_api::http::router::build_router;
use lexbridge_api::state::AppState;
use lexbridge_core::chat::service::{BotTarget, ChatService};
use lexbridge_core::repository::history::ChatHistoryStore;
use lexbridge_core::repository::intent::IntentResolver;
use lexbridge_types::error::{IntentError, StoreError};
use lexbridge_types::history::ChatHistoryRecord;
use lexbridge_types::intent::{
    ContentType, Intent, IntentResolution, RecognizeText, ResponseMessage, SessionState,
};

// =============================================================================
// Fakes
// =============================================================================

struct FakeResolver {
    fail: bool,
    calls: Mutex<Vec<RecognizeText>>,
}

impl IntentResolver for FakeResolver {
    async fn recognize_text(
        &self,
        request: &RecognizeText,
    ) -> Result<IntentResolution, IntentError> {
        self.calls.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(IntentError::Service {
                status: 500,
                message: "internal failure".to_string(),
            });
        }
        Ok(IntentResolution {
            messages: vec![
                ResponseMessage::plain_text("Welcome to the Hotel AI."),
                ResponseMessage {
                    content_type: ContentType::CustomPayload,
                    content: Some("{}".to_string()),
                },
                ResponseMessage::plain_text("How can I help you today?"),
            ],
            session_state: Some(SessionState {
                intent: Some(Intent {
                    name: Some("WelcomeIntent".to_string()),
                    state: Some("Fulfilled".to_string()),
                }),
                ..Default::default()
            }),
            ..Default::default()
        })
    }
}

struct FakeStore {
    reject: bool,
    records: Mutex<Vec<ChatHistoryRecord>>,
}

impl ChatHistoryStore for FakeStore {
    async fn put_record(&self, record: &ChatHistoryRecord) -> Result<(), StoreError> {
        self.records.lock().unwrap().push(record.clone());
        if self.reject {
            return Err(StoreError::Rejected {
                code: "ProvisionedThroughputExceededException".to_string(),
                message: "Rate of requests exceeds the allowed throughput".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn make_state(resolver_fails: bool, store_rejects: bool) -> AppState<FakeResolver, FakeStore> {
    AppState::new(ChatService::new(
        FakeResolver {
            fail: resolver_fails,
            calls: Mutex::new(Vec::new()),
        },
        FakeStore {
            reject: store_rejects,
            records: Mutex::new(Vec::new()),
        },
        BotTarget::new("BOT123", "ALIAS456"),
    ))
}

fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

async fn read_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// POST /chat
// =============================================================================

#[tokio::test]
async fn chat_success_generates_ids() {
    let state = make_state(false, false);
    let app = build_router(state.clone());

    let response = app
        .oneshot(post_json("/chat", r#"{"message": "hi"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );

    let body = read_body(response).await;
    let session_id = body["sessionId"].as_str().unwrap();
    let chat_id = body["chatId"].as_str().unwrap();
    assert!(Uuid::parse_str(session_id).is_ok());
    assert!(Uuid::parse_str(chat_id).is_ok());
    assert_ne!(session_id, chat_id);
    assert_eq!(
        body["message"],
        "Welcome to the Hotel AI. How can I help you today?"
    );
    assert_eq!(body["intent"], "WelcomeIntent");

    let records = state.chat.history().records.lock().unwrap().clone();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].session_id, session_id);
}

#[tokio::test]
async fn chat_echoes_provided_ids() {
    let state = make_state(false, false);
    let app = build_router(state.clone());

    let response = app
        .oneshot(post_json(
            "/chat",
            r#"{"message": "hi", "sessionId": "web-session-1", "chatId": "tab-7"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert_eq!(body["sessionId"], "web-session-1");
    assert_eq!(body["chatId"], "tab-7");

    let calls = state.chat.resolver().calls.lock().unwrap().clone();
    assert_eq!(calls[0].session_id, "web-session-1");
    assert_eq!(calls[0].locale_id, "en_US");
}

#[tokio::test]
async fn chat_missing_message_is_400() {
    for json in [r#"{}"#, r#"{"message": ""}"#, r#"{"sessionId": "s-1"}"#, ""] {
        let state = make_state(false, false);
        let app = build_router(state.clone());

        let response = app.oneshot(post_json("/chat", json)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {json:?}");
        let body = read_body(response).await;
        assert_eq!(body, serde_json::json!({"error": "Message field is required"}));
        assert!(state.chat.resolver().calls.lock().unwrap().is_empty());
        assert!(state.chat.history().records.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn chat_backend_failure_is_500() {
    let state = make_state(true, false);
    let app = build_router(state.clone());

    let response = app
        .oneshot(post_json("/chat", r#"{"message": "hi"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_body(response).await;
    assert_eq!(
        body,
        serde_json::json!({"error": "Internal Server Error processing chat request"})
    );
    assert!(state.chat.history().records.lock().unwrap().is_empty());
}

#[tokio::test]
async fn chat_invalid_json_is_500() {
    let app = build_router(make_state(false, false));

    let response = app
        .oneshot(post_json("/chat", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn chat_store_rejection_still_succeeds() {
    let state = make_state(false, true);
    let app = build_router(state.clone());

    let response = app
        .oneshot(post_json(
            "/chat",
            r#"{"message": "hi", "sessionId": "s-1", "chatId": "c-1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert_eq!(body["sessionId"], "s-1");
    assert_eq!(body["chatId"], "c-1");
    assert_eq!(body["intent"], "WelcomeIntent");
    assert_eq!(state.chat.history().records.lock().unwrap().len(), 1);
}

// =============================================================================
// POST /invoke
// =============================================================================

#[tokio::test]
async fn invoke_returns_envelope_document() {
    let app = build_router(make_state(false, false));

    let event = serde_json::json!({
        "httpMethod": "POST",
        "body": r#"{"message": "hi", "sessionId": "s-1"}"#,
        "isBase64Encoded": false,
    });
    let response = app
        .oneshot(post_json("/invoke", &event.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let envelope = read_body(response).await;
    assert_eq!(envelope["statusCode"], 200);
    assert_eq!(envelope["headers"]["Content-Type"], "application/json");
    assert_eq!(envelope["headers"]["Access-Control-Allow-Origin"], "*");

    let inner: Value = serde_json::from_str(envelope["body"].as_str().unwrap()).unwrap();
    assert_eq!(inner["sessionId"], "s-1");
    assert_eq!(inner["intent"], "WelcomeIntent");
}

#[tokio::test]
async fn invoke_decodes_base64_body() {
    let app = build_router(make_state(false, false));

    // {"message":"hi"}
    let event = r#"{"body": "eyJtZXNzYWdlIjoiaGkifQ==", "isBase64Encoded": true}"#;
    let response = app.oneshot(post_json("/invoke", event)).await.unwrap();

    let envelope = read_body(response).await;
    assert_eq!(envelope["statusCode"], 200);
}

#[tokio::test]
async fn invoke_without_body_is_400_envelope() {
    let app = build_router(make_state(false, false));

    let response = app
        .oneshot(post_json("/invoke", r#"{"body": null}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let envelope = read_body(response).await;
    assert_eq!(envelope["statusCode"], 400);
    assert_eq!(envelope["body"], r#"{"error":"Message field is required"}"#);
}

#[tokio::test]
async fn invoke_bad_base64_is_500_envelope() {
    let state = make_state(false, false);
    let app = build_router(state.clone());

    let response = app
        .oneshot(post_json(
            "/invoke",
            r#"{"body": "%%%", "isBase64Encoded": true}"#,
        ))
        .await
        .unwrap();

    let envelope = read_body(response).await;
    assert_eq!(envelope["statusCode"], 500);
    assert!(state.chat.resolver().calls.lock().unwrap().is_empty());
}

// =============================================================================
// Fulfillment and health
// =============================================================================

#[tokio::test]
async fn book_room_hook_escalates() {
    let app = build_router(make_state(false, false));

    let event = r#"{
        "sessionId": "s-1",
        "inputTranscript": "book me a room",
        "sessionState": {
            "intent": {"name": "BookRoom", "state": "ReadyForFulfillment"},
            "sessionAttributes": {"guest": "alice"}
        }
    }"#;
    let response = app
        .oneshot(post_json("/fulfillment/book-room", event))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert_eq!(body["sessionState"]["dialogAction"]["type"], "Close");
    assert_eq!(body["sessionState"]["intent"]["name"], "BookRoom");
    assert_eq!(body["sessionState"]["intent"]["state"], "Fulfilled");
    assert_eq!(body["sessionState"]["sessionAttributes"]["guest"], "alice");
    assert_eq!(body["sessionState"]["sessionAttributes"]["handoff"], "human");
    assert_eq!(
        body["messages"][0]["content"],
        "This request has been forwarded to a hotel agent."
    );
}

#[tokio::test]
async fn health_check_ok() {
    let app = build_router(make_state(false, false));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert_eq!(body["status"], "ok");
}
