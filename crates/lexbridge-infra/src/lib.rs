//! Infrastructure implementations for lexbridge.
//!
//! - `aws`: credentials and SigV4 request signing shared by the clients
//! - `lex`: Lex V2 runtime client implementing `IntentResolver`
//! - `dynamodb`: DynamoDB history table implementing `ChatHistoryStore`
//! - `config`: process configuration resolved from the environment

pub mod aws;
pub mod config;
pub mod dynamodb;
pub mod lex;
