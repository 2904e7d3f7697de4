//! Normalized user record consumed by the aggregation layer.

use serde::{Deserialize, Serialize};

use super::{Role, UserId};

/// A user known to the workflow, with exactly one role.
///
/// User rosters are owned by the surrounding application; the engine only
/// needs the id-role-name triple to compute per-assignee statistics and
/// render role metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier, matched against task assignees.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// The user's single role.
    pub role: Role,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }
}
