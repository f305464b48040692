//! # Record Resource
//!
//! Create, update and delete against the record store. Every write runs under
//! a single resource-wide lock so id allocation and read-modify-write merges
//! are atomic within the process.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tracing::info;

use crate::record_store::{Record, RecordId, RecordStore};

use super::errors::{ResourceError, ResourceResult};
use super::id_allocator::IdAllocator;
use super::response::ModifiedResponse;

/// Reserved key holding the record id
pub const ID_FIELD: &str = "id";

/// Record lifecycle over a [`RecordStore`]
#[derive(Debug)]
pub struct RecordResource {
    store: Arc<dyn RecordStore>,
    ids: IdAllocator,
    write_lock: Mutex<()>,
}

impl RecordResource {
    pub fn new(store: Arc<dyn RecordStore>, ids: IdAllocator) -> Self {
        Self {
            store,
            ids,
            write_lock: Mutex::new(()),
        }
    }

    /// Backing store
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    fn lock(&self) -> ResourceResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| ResourceError::Internal("Lock poisoned".to_string()))
    }

    fn into_record(payload: Value) -> ResourceResult<Record> {
        match payload {
            Value::Object(map) => Ok(map),
            other => Err(ResourceError::Validation(format!(
                "expected a JSON object, got {}",
                json_type(&other)
            ))),
        }
    }

    /// Store `payload` under a newly allocated id
    ///
    /// Any client-supplied `id` is overwritten.
    pub fn create(&self, payload: Value) -> ResourceResult<ModifiedResponse> {
        let mut record = Self::into_record(payload)?;

        let _guard = self.lock()?;
        let id = self.ids.next(self.store.as_ref())?;
        record.insert(ID_FIELD.to_string(), Value::from(id));
        self.store.set(id, record.clone())?;

        info!("Created new restservice record {}", id);
        Ok(ModifiedResponse::created(record))
    }

    /// Merge `payload` over the stored record
    ///
    /// Payload keys win, stored keys missing from the payload are kept. The
    /// stored id cannot be changed.
    pub fn update(&self, id: RecordId, payload: Value) -> ResourceResult<ModifiedResponse> {
        let patch = Self::into_record(payload)?;

        let _guard = self.lock()?;
        let stored = self.store.get(id)?.ok_or(ResourceError::NotFound)?;

        let mut merged = patch;
        for (key, value) in stored {
            if !merged.contains_key(&key) {
                merged.insert(key, value);
            }
        }
        merged.insert(ID_FIELD.to_string(), Value::from(id));

        self.store.set(id, merged.clone())?;

        info!("The restservice record {} has been updated", id);
        Ok(ModifiedResponse::updated(merged))
    }

    /// Remove the record under `id`
    pub fn delete(&self, id: RecordId) -> ResourceResult<ModifiedResponse> {
        let _guard = self.lock()?;
        if !self.store.has(id)? {
            return Err(ResourceError::NotFound);
        }
        self.store.delete(id)?;

        info!("The restservice record {} has been deleted", id);
        Ok(ModifiedResponse::deleted())
    }

    /// Whether a record exists under `id`
    pub fn exists(&self, id: RecordId) -> ResourceResult<bool> {
        Ok(self.store.has(id)?)
    }

    /// Single-record read
    pub fn get(&self, id: RecordId) -> ResourceResult<Record> {
        self.store.get(id)?.ok_or(ResourceError::NotFound)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
