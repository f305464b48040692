//! # In-Memory Content Repository
//!
//! Serves content from a JSON fixture:
//!
//! ```json
//! {
//!   "parents": [
//!     {"id": 1, "type": "teachers", "references": {"field_teachers": [{"target_id": 10}]}}
//!   ],
//!   "children": [
//!     {"id": 10,
//!      "fields": {"field_teacher_full_name": [{"value": "Jane Doe"}]},
//!      "files": {"field_picture": {"id": 5, "uri": "public://teachers/jane.jpg"}}}
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::errors::{ContentError, ContentResult};
use super::repository::{ChildEntity, ContentId, ContentRepository, ParentEntity};

#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    parents: Vec<ParentEntity>,
    #[serde(default)]
    children: Vec<ChildEntity>,
}

/// Content repository held in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryContentRepository {
    /// Kept in insertion order, which is the query order
    parents: Vec<ParentEntity>,
    children: BTreeMap<ContentId, ChildEntity>,
}

impl MemoryContentRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a repository from a JSON fixture file
    pub fn from_fixture(path: &Path) -> ContentResult<Self> {
        let content = fs::read_to_string(path)?;
        let fixture: Fixture =
            serde_json::from_str(&content).map_err(|e| ContentError::InvalidFixture {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let mut repo = Self::new();
        for parent in fixture.parents {
            repo = repo.with_parent(parent);
        }
        for child in fixture.children {
            repo = repo.with_child(child);
        }
        Ok(repo)
    }

    /// Add or replace a parent
    pub fn with_parent(mut self, parent: ParentEntity) -> Self {
        match self.parents.iter().position(|p| p.id == parent.id) {
            Some(idx) => self.parents[idx] = parent,
            None => self.parents.push(parent),
        }
        self
    }

    /// Add or replace a child
    pub fn with_child(mut self, child: ChildEntity) -> Self {
        self.children.insert(child.id, child);
        self
    }
}

impl ContentRepository for MemoryContentRepository {
    fn query_by_type(&self, content_type: &str, access_check: bool) -> ContentResult<Vec<ContentId>> {
        Ok(self
            .parents
            .iter()
            .filter(|p| p.content_type == content_type)
            .filter(|p| !access_check || p.published)
            .map(|p| p.id)
            .collect())
    }

    fn load_parent(&self, id: ContentId) -> ContentResult<Option<ParentEntity>> {
        Ok(self.parents.iter().find(|p| p.id == id).cloned())
    }

    fn load_child(&self, id: ContentId) -> ContentResult<Option<ChildEntity>> {
        Ok(self.children.get(&id).cloned())
    }
}
