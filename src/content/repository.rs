//! # Content Model and Repository Trait

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::ContentResult;

/// Identifier of a parent item, child item or stored file
pub type ContentId = u64;

/// Reference from a parent to one embedded child
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildReference {
    pub target_id: ContentId,
}

/// Top-level content item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentEntity {
    pub id: ContentId,

    #[serde(rename = "type")]
    pub content_type: String,

    #[serde(default = "default_published")]
    pub published: bool,

    /// Reference fields, each an ordered list of embedded children
    #[serde(default)]
    pub references: BTreeMap<String, Vec<ChildReference>>,
}

fn default_published() -> bool {
    true
}

impl ParentEntity {
    /// Ordered references held by `field`, empty when the field is unset
    pub fn references(&self, field: &str) -> &[ChildReference] {
        self.references.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A file resource held by the content system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: ContentId,
    /// Stream-wrapper URI, e.g. `public://teachers/jane.jpg`
    pub uri: String,
}

/// Embedded child item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildEntity {
    pub id: ContentId,

    /// Raw value collections keyed by field name
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<Value>>,

    /// File-reference fields, already resolved to their stored file
    #[serde(default)]
    pub files: BTreeMap<String, StoredFile>,
}

impl ChildEntity {
    /// Raw values of `field`; an unset field reads as an empty collection
    pub fn values(&self, field: &str) -> Vec<Value> {
        self.fields.get(field).cloned().unwrap_or_default()
    }

    /// Stored file referenced by `field`
    pub fn file(&self, field: &str) -> Option<&StoredFile> {
        self.files.get(field)
    }
}

/// Read-only query interface over the content hierarchy
pub trait ContentRepository: Send + Sync + std::fmt::Debug {
    /// Ids of every parent of `content_type`, in repository order. With
    /// `access_check` enabled, items the anonymous viewer cannot see are
    /// excluded.
    fn query_by_type(&self, content_type: &str, access_check: bool) -> ContentResult<Vec<ContentId>>;

    /// Load a parent by id
    fn load_parent(&self, id: ContentId) -> ContentResult<Option<ParentEntity>>;

    /// Load a child by reference target id
    fn load_child(&self, id: ContentId) -> ContentResult<Option<ChildEntity>>;
}
