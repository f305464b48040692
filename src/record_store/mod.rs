//! # Record Store
//!
//! Key-value persistence for restservice records, keyed by integer id.
//!
//! Two backends are provided: an in-memory map for tests and ephemeral
//! deployments, and a JSON-file backend that survives restarts.

pub mod backend;
pub mod errors;
pub mod file;
pub mod memory;

pub use backend::{Record, RecordId, RecordStore};
pub use errors::{StoreError, StoreResult};
pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;
