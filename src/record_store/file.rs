//! # JSON File Backend
//!
//! Keeps the full collection in memory and rewrites the backing file after
//! every mutation. Writes go to a sibling temp file first and are renamed into
//! place, so a crash mid-write leaves the previous snapshot intact.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::backend::{Record, RecordId, RecordStore};
use super::errors::{StoreError, StoreResult};

/// On-disk layout
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    high_water_mark: RecordId,
    #[serde(default)]
    records: BTreeMap<RecordId, Record>,
}

/// Record store persisted to a single JSON file
#[derive(Debug)]
pub struct FileRecordStore {
    path: PathBuf,
    state: RwLock<Snapshot>,
}

impl FileRecordStore {
    /// Open the store at `path`, creating parent directories as needed.
    /// A missing file is treated as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let snapshot = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Snapshot::default(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            state: RwLock::new(snapshot),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let encoded = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Apply `mutate` to a copy of the snapshot and persist it. The in-memory
    /// state only changes once the file write succeeded.
    fn mutate<F>(&self, mutate: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Snapshot),
    {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        let mut next = state.clone();
        mutate(&mut next);
        self.persist(&next)?;
        *state = next;
        Ok(())
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Snapshot>> {
        self.state.read().map_err(|_| StoreError::LockPoisoned)
    }
}

impl RecordStore for FileRecordStore {
    fn get(&self, id: RecordId) -> StoreResult<Option<Record>> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    fn set(&self, id: RecordId, record: Record) -> StoreResult<()> {
        self.mutate(|s| {
            s.records.insert(id, record);
        })
    }

    fn delete(&self, id: RecordId) -> StoreResult<()> {
        if !self.has(id)? {
            return Ok(());
        }
        self.mutate(|s| {
            s.records.remove(&id);
        })
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
        if id <= self.high_water_mark()? {
            return Ok(());
        }
        self.mutate(|s| s.high_water_mark = s.high_water_mark.max(id))
    }
}
