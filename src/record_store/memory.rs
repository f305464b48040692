//! # In-Memory Backend

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::backend::{Record, RecordId, RecordStore};
use super::errors::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<RecordId, Record>,
    high_water_mark: RecordId,
}

/// Record store held entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Inner>,
}

impl MemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl RecordStore for MemoryRecordStore {
    fn get(&self, id: RecordId) -> StoreResult<Option<Record>> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    fn set(&self, id: RecordId, record: Record) -> StoreResult<()> {
        self.write()?.records.insert(id, record);
        Ok(())
    }

    fn delete(&self, id: RecordId) -> StoreResult<()> {
        self.write()?.records.remove(&id);
        Ok(())
    }

    fn has(&self, id: RecordId) -> StoreResult<bool> {
        Ok(self.read()?.records.contains_key(&id))
    }

    fn get_all(&self) -> StoreResult<BTreeMap<RecordId, Record>> {
        Ok(self.read()?.records.clone())
    }

    fn high_water_mark(&self) -> StoreResult<RecordId> {
        Ok(self.read()?.high_water_mark)
    }

    fn raise_high_water_mark(&self, id: RecordId) -> StoreResult<()> {
        let mut inner = self.write()?;
        inner.high_water_mark = inner.high_water_mark.max(id);
        Ok(())
    }
}
