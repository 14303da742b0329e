//! Lex V2 runtime integration.

pub mod client;

pub use client::LexRuntimeClient;
