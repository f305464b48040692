//! # Teacher Directory Aggregation
//!
//! Flattens every `teachers` content item's embedded teacher entries into one
//! list of projected rows, each carrying the raw social/profile field values
//! and an absolute URL for the teacher's picture.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::content::{ChildEntity, ContentRepository, FileUrlGenerator};
use crate::resource::{ResourceError, ResourceResult};

pub const FIELD_DESIGNATION: &str = "field_designation";
pub const FIELD_FACEBOOK_LINK: &str = "field_facebook_link";
pub const FIELD_INSTAGRAM_LINK: &str = "field_instagram_link";
pub const FIELD_TEACHER_FULL_NAME: &str = "field_teacher_full_name";
pub const FIELD_TWITTER_LINK: &str = "field_twitter_link";

/// What to do when a reference resolves to nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokenReferencePolicy {
    /// Log a warning and leave the row out
    #[default]
    Skip,
    /// Abort the whole read with [`ResourceError::BrokenReference`]
    Fail,
}

/// Which content the aggregation walks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationSettings {
    /// Parent content type to query (default: "teachers")
    #[serde(default = "default_parent_type")]
    pub parent_type: String,

    /// Parent field holding the embedded child references (default: "field_teachers")
    #[serde(default = "default_child_field")]
    pub child_field: String,

    /// Child file field resolved into `field_picture` (default: "field_picture")
    #[serde(default = "default_picture_field")]
    pub picture_field: String,

    /// Hide parents the anonymous viewer cannot see (default: true)
    #[serde(default = "default_access_check")]
    pub access_check: bool,

    #[serde(default)]
    pub broken_references: BrokenReferencePolicy,
}

fn default_parent_type() -> String {
    "teachers".to_string()
}

fn default_child_field() -> String {
    "field_teachers".to_string()
}

fn default_picture_field() -> String {
    "field_picture".to_string()
}

fn default_access_check() -> bool {
    true
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            parent_type: default_parent_type(),
            child_field: default_child_field(),
            picture_field: default_picture_field(),
            access_check: default_access_check(),
            broken_references: BrokenReferencePolicy::default(),
        }
    }
}

/// One flattened output row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedRecord {
    pub field_designation: Vec<Value>,
    pub field_facebook_link: Vec<Value>,
    pub field_instagram_link: Vec<Value>,
    pub field_teacher_full_name: Vec<Value>,
    pub field_twitter_link: Vec<Value>,
    /// Absolute URL of the picture
    pub field_picture: String,
}

/// Read-path query over the content repository
#[derive(Debug, Clone)]
pub struct AggregationQuery {
    repository: Arc<dyn ContentRepository>,
    urls: Arc<dyn FileUrlGenerator>,
    settings: AggregationSettings,
}

impl AggregationQuery {
    pub fn new(
        repository: Arc<dyn ContentRepository>,
        urls: Arc<dyn FileUrlGenerator>,
        settings: AggregationSettings,
    ) -> Self {
        Self {
            repository,
            urls,
            settings,
        }
    }

    pub fn settings(&self) -> &AggregationSettings {
        &self.settings
    }

    /// Walk every parent and its embedded children, in repository order
    pub fn execute(&self) -> ResourceResult<Vec<ProjectedRecord>> {
        let parent_ids = self
            .repository
            .query_by_type(&self.settings.parent_type, self.settings.access_check)?;

        let mut rows = Vec::new();
        for parent_id in &parent_ids {
            let Some(parent) = self.repository.load_parent(*parent_id)? else {
                self.broken_reference(format!("parent {} could not be loaded", parent_id))?;
                continue;
            };

            for reference in parent.references(&self.settings.child_field) {
                let Some(child) = self.repository.load_child(reference.target_id)? else {
                    self.broken_reference(format!(
                        "parent {} references missing child {}",
                        parent.id, reference.target_id
                    ))?;
                    continue;
                };

                if let Some(row) = self.project(&child)? {
                    rows.push(row);
                }
            }
        }

        debug!(
            parents = parent_ids.len(),
            rows = rows.len(),
            "Aggregated {} content",
            self.settings.parent_type
        );
        Ok(rows)
    }

    /// [`execute`](Self::execute), encoded as a JSON array
    pub fn execute_encoded(&self) -> ResourceResult<String> {
        let rows = self.execute()?;
        serde_json::to_string(&rows).map_err(|e| ResourceError::Internal(e.to_string()))
    }

    fn project(&self, child: &ChildEntity) -> ResourceResult<Option<ProjectedRecord>> {
        let Some(picture) = child.file(&self.settings.picture_field) else {
            self.broken_reference(format!(
                "child {} has no {}",
                child.id, self.settings.picture_field
            ))?;
            return Ok(None);
        };

        let field_picture = match self.urls.absolute_url(&picture.uri) {
            Ok(url) => url,
            Err(e) => {
                self.broken_reference(format!(
                    "child {} picture {} cannot be resolved: {}",
                    child.id, picture.uri, e
                ))?;
                return Ok(None);
            }
        };

        Ok(Some(ProjectedRecord {
            field_designation: child.values(FIELD_DESIGNATION),
            field_facebook_link: child.values(FIELD_FACEBOOK_LINK),
            field_instagram_link: child.values(FIELD_INSTAGRAM_LINK),
            field_teacher_full_name: child.values(FIELD_TEACHER_FULL_NAME),
            field_twitter_link: child.values(FIELD_TWITTER_LINK),
            field_picture,
        }))
    }

    fn broken_reference(&self, detail: String) -> ResourceResult<()> {
        match self.settings.broken_references {
            BrokenReferencePolicy::Skip => {
                warn!("Skipping broken reference: {}", detail);
                Ok(())
            }
            BrokenReferencePolicy::Fail => Err(ResourceError::BrokenReference(detail)),
        }
    }
}
