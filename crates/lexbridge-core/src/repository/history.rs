//! Chat history store port.

use lexbridge_types::error::StoreError;
use lexbridge_types::history::ChatHistoryRecord;

/// Append-only store of chat exchanges, keyed by `(session_id, timestamp)`.
///
/// Records are never updated or deleted through this trait; expiry is left
/// to the store's own retention mechanism.
pub trait ChatHistoryStore: Send + Sync {
    /// Insert a single record. A record with the same key is overwritten.
    fn put_record(
        &self,
        record: &ChatHistoryRecord,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
