//! HTTP front door for lexbridge.
//!
//! Exposes the chat handler over axum and wires the AWS-backed services
//! into shared application state. The `lexbridge` binary in `main.rs` is a
//! thin CLI around [`state::AppState::init`] and [`http::router::build_router`].

pub mod http;
pub mod state;
