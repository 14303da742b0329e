//! Shared domain types for lexbridge.
//!
//! This crate contains the types exchanged between the HTTP front door, the
//! chat orchestration core and the AWS-backed infrastructure: inbound chat
//! requests, intent-resolution results, persisted history records, the
//! response envelope, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod chat;
pub mod envelope;
pub mod error;
pub mod fulfillment;
pub mod history;
pub mod intent;
