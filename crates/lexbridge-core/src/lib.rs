//! Chat orchestration and port (trait) definitions for lexbridge.
//!
//! This crate defines the ports that the infrastructure layer
//! (lexbridge-infra) implements, and the chat service that drives one
//! request through them. It depends only on `lexbridge-types` -- never on
//! `lexbridge-infra` or any network/IO crate.

pub mod chat;
pub mod fulfillment;
pub mod repository;
