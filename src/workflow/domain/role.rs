//! Workflow roles and the per-task role assignment record.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ParseRoleError, UserId, WorkflowError};

/// Job function owning one or more pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Product manager; owns the backlog and creates tasks.
    #[serde(rename = "pm")]
    ProductManager,
    /// Developer; owns the development stages.
    #[serde(rename = "developer")]
    Developer,
    /// Tester; owns the testing stages.
    #[serde(rename = "tester")]
    Tester,
    /// DevOps engineer; owns the deployment stages.
    #[serde(rename = "devops")]
    DevOps,
    /// QA reviewer; owns the final review stages.
    #[serde(rename = "qa")]
    QaReviewer,
}

impl Role {
    /// All roles in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::ProductManager,
        Self::Developer,
        Self::Tester,
        Self::DevOps,
        Self::QaReviewer,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProductManager => "pm",
            Self::Developer => "developer",
            Self::Tester => "tester",
            Self::DevOps => "devops",
            Self::QaReviewer => "qa",
        }
    }

    /// Returns the human-readable role name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ProductManager => "Product Manager",
            Self::Developer => "Developer",
            Self::Tester => "Tester",
            Self::DevOps => "DevOps",
            Self::QaReviewer => "QA Reviewer",
        }
    }

    /// Returns the display colour associated with the role.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::ProductManager => "#7b68ee",
            Self::Developer => "#49ccf9",
            Self::Tester => "#ff6b9d",
            Self::DevOps => "#00d4aa",
            Self::QaReviewer => "#ffa800",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pm" => Ok(Self::ProductManager),
            "developer" => Ok(Self::Developer),
            "tester" => Ok(Self::Tester),
            "devops" => Ok(Self::DevOps),
            "qa" => Ok(Self::QaReviewer),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unvalidated assignee selections captured when a task is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssigneeDraft {
    /// Product manager, defaults to the creator when absent.
    pub pm: Option<UserId>,
    /// Developer assignee.
    pub developer: Option<UserId>,
    /// Tester assignee.
    pub tester: Option<UserId>,
    /// DevOps assignee.
    pub devops: Option<UserId>,
    /// QA reviewer assignee.
    pub qa: Option<UserId>,
}

/// Role-to-assignee record locked at task creation.
///
/// Every role has exactly one assignee. The record never changes after the
/// task is created, regardless of how the task moves through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignments {
    pm: UserId,
    developer: UserId,
    tester: UserId,
    devops: UserId,
    qa: UserId,
}

impl RoleAssignments {
    /// Builds the locked record from draft selections.
    ///
    /// The product manager defaults to `creator` when the draft leaves it
    /// empty; every other role is mandatory.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::MissingAssignee`] naming the first mandatory
    /// role without an assignee.
    pub fn from_draft(draft: AssigneeDraft, creator: &UserId) -> Result<Self, WorkflowError> {
        let pm = draft.pm.unwrap_or_else(|| creator.clone());
        let developer = draft
            .developer
            .ok_or(WorkflowError::MissingAssignee(Role::Developer))?;
        let tester = draft
            .tester
            .ok_or(WorkflowError::MissingAssignee(Role::Tester))?;
        let devops = draft
            .devops
            .ok_or(WorkflowError::MissingAssignee(Role::DevOps))?;
        let qa = draft
            .qa
            .ok_or(WorkflowError::MissingAssignee(Role::QaReviewer))?;

        Ok(Self {
            pm,
            developer,
            tester,
            devops,
            qa,
        })
    }

    /// Returns the assignee for the given role.
    #[must_use]
    pub const fn assignee(&self, role: Role) -> &UserId {
        match role {
            Role::ProductManager => &self.pm,
            Role::Developer => &self.developer,
            Role::Tester => &self.tester,
            Role::DevOps => &self.devops,
            Role::QaReviewer => &self.qa,
        }
    }
}
