//! Axum router configuration with middleware.
//!
//! Middleware: request tracing. The chat envelope carries its own
//! cross-origin header, so no CORS layer is installed.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use lexbridge_core::repository::history::ChatHistoryStore;
use lexbridge_core::repository::intent::IntentResolver;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router<R, H>(state: AppState<R, H>) -> Router
where
    R: IntentResolver + 'static,
    H: ChatHistoryStore + 'static,
{
    Router::new()
        .route("/chat", post(handlers::chat::chat::<R, H>))
        .route("/invoke", post(handlers::chat::invoke::<R, H>))
        .route(
            "/fulfillment/book-room",
            post(handlers::fulfillment::book_room),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
