//! # Content Repository
//!
//! Read-only access to the hierarchical content the directory endpoint
//! aggregates: parent content items embedding ordered child references, and
//! the stored files those children point at.

pub mod errors;
pub mod memory;
pub mod repository;
pub mod url;

pub use errors::{ContentError, ContentResult};
pub use memory::MemoryContentRepository;
pub use repository::{ChildEntity, ChildReference, ContentId, ContentRepository, ParentEntity, StoredFile};
pub use url::{FileUrlGenerator, PublicFileUrlGenerator};
