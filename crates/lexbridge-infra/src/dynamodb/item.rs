//! Encoding of history records as DynamoDB attribute maps.

use serde_json::{Map, Value, json};

use lexbridge_types::history::ChatHistoryRecord;

/// Partition key attribute of the history table.
pub const PARTITION_KEY: &str = "sessionId";
/// Sort key attribute of the history table.
pub const SORT_KEY: &str = "timestamp";
/// Attribute the table's TTL setting watches.
pub const TTL_ATTRIBUTE: &str = "ttl";

fn string(value: &str) -> Value {
    json!({ "S": value })
}

fn number(value: i64) -> Value {
    json!({ "N": value.to_string() })
}

/// Typed attribute map for a `PutItem` call.
pub fn to_item(record: &ChatHistoryRecord) -> Map<String, Value> {
    let mut item = Map::new();
    item.insert(PARTITION_KEY.to_string(), string(&record.session_id));
    item.insert(SORT_KEY.to_string(), number(record.timestamp));
    item.insert("chatId".to_string(), string(&record.chat_id));
    item.insert("userMessage".to_string(), string(&record.user_message));
    item.insert("botResponse".to_string(), string(&record.bot_response));
    item.insert("intentName".to_string(), string(&record.intent_name));
    item.insert(TTL_ATTRIBUTE.to_string(), number(record.expires_at));
    item
}
