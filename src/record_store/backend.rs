//! # Record Store Trait

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::errors::StoreResult;

/// Record identifier. Always positive for persisted records.
pub type RecordId = u64;

/// An open-ended field mapping. Key order is preserved.
pub type Record = Map<String, Value>;

/// Backend trait for record persistence
///
/// Implementations provide atomic per-key operations only. Callers that need
/// read-modify-write atomicity must serialize access themselves.
pub trait RecordStore: Send + Sync + std::fmt::Debug {
    /// Read the record stored under `id`
    fn get(&self, id: RecordId) -> StoreResult<Option<Record>>;

    /// Store `record` under `id`, replacing any previous value
    fn set(&self, id: RecordId, record: Record) -> StoreResult<()>;

    /// Remove the record under `id`. Removing a missing key is not an error.
    fn delete(&self, id: RecordId) -> StoreResult<()>;

    /// Check whether `id` is present
    fn has(&self, id: RecordId) -> StoreResult<bool>;

    /// Snapshot of every stored record, ordered by id
    fn get_all(&self) -> StoreResult<BTreeMap<RecordId, Record>>;

    /// Highest id ever issued against this store, 0 when none
    fn high_water_mark(&self) -> StoreResult<RecordId>;

    /// Raise the high-water mark to `id`. Lower values are ignored.
    fn raise_high_water_mark(&self, id: RecordId) -> StoreResult<()>;
}
