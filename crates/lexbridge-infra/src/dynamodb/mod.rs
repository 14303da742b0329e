//! DynamoDB chat history table.

pub mod item;
pub mod store;

pub use store::DynamoDbHistoryStore;
