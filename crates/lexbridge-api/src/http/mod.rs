//! HTTP layer for lexbridge.
//!
//! Axum routes for chat, proxy-event invocation, fulfillment code hooks and
//! health checks. Every chat response is rendered from a `ResponseEnvelope`.

pub mod handlers;
pub mod response;
pub mod router;
