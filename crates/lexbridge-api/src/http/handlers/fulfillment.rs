//! Fulfillment code-hook endpoints.
//!
//! POST /fulfillment/book-room

use axum::Json;

use lexbridge_core::fulfillment;
use lexbridge_types::fulfillment::{CodeHookEvent, CodeHookResponse};

/// POST /fulfillment/book-room -- hand booking requests to a human agent.
pub async fn book_room(Json(event): Json<CodeHookEvent>) -> Json<CodeHookResponse> {
    Json(fulfillment::book_room(&event))
}
