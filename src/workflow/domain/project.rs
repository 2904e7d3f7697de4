//! Project record grouping tasks for filtering and rollups.

use serde::{Deserialize, Serialize};

use super::ProjectId;

/// A project that tasks may belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable project identifier, matched against task `project_id`.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Display colour.
    pub color: String,
}

impl Project {
    /// Creates a project record.
    #[must_use]
    pub fn new(id: ProjectId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
        }
    }
}
