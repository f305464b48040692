//! # Id Allocation

use serde::{Deserialize, Serialize};

use crate::record_store::{RecordId, RecordStore, StoreResult};

/// How the next record id is derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Highest existing key + 1. Reissues the id of a deleted maximum.
    MaxKeyPlusOne,

    /// Highest id ever issued + 1, tracked by the store's high-water mark.
    /// Ids are never reused.
    #[default]
    Monotonic,
}

/// Derives the next unused record id from store state
///
/// Not safe against concurrent callers on its own; the caller must hold the
/// resource write lock between `next` and the write that uses the id.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdAllocator {
    strategy: IdStrategy,
}

impl IdAllocator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Allocate the next id. Under `Monotonic` this also records the id as
    /// issued.
    pub fn next(&self, store: &dyn RecordStore) -> StoreResult<RecordId> {
        let max_key = store.get_all()?.keys().next_back().copied().unwrap_or(0);

        match self.strategy {
            IdStrategy::MaxKeyPlusOne => Ok(max_key + 1),
            IdStrategy::Monotonic => {
                let id = max_key.max(store.high_water_mark()?) + 1;
                store.raise_high_water_mark(id)?;
                Ok(id)
            }
        }
    }
}
