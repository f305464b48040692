//! # restservice Resource
//!
//! Create, update, delete and single-record reads over the record store,
//! with server-assigned integer ids.

pub mod errors;
pub mod id_allocator;
pub mod record;
pub mod response;

pub use errors::{ResourceError, ResourceResult};
pub use id_allocator::{IdAllocator, IdStrategy};
pub use record::RecordResource;
pub use response::ModifiedResponse;
