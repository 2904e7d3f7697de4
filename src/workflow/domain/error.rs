//! Error types for workflow domain validation and parsing.

use thiserror::Error;

use super::{Role, StageId, TaskId};

/// Transition attempted when an operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Forward transition to the configured next stage.
    Advance,
    /// Backward transition to the configured reject target.
    Reject,
}

impl TransitionKind {
    /// Returns the lowercase verb used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Advance => "advance",
            Self::Reject => "reject",
        }
    }
}

impl std::fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors returned while constructing or mutating workflow domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// The current stage forbids the attempted transition.
    #[error("cannot {action} task {task_id} from stage '{stage}'")]
    IllegalTransition {
        /// Task the transition was attempted on.
        task_id: TaskId,
        /// Stage the task occupied when the transition was refused.
        stage: StageId,
        /// Which transition was attempted.
        action: TransitionKind,
    },

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The rejection reason is empty after trimming.
    #[error("rejection reason for task {task_id} must not be empty")]
    EmptyRejectionReason {
        /// Task the rejection was attempted on.
        task_id: TaskId,
    },

    /// A mandatory role has no assignee at creation.
    #[error("no assignee supplied for mandatory role '{0}'")]
    MissingAssignee(Role),

    /// A user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// A project identifier is empty after trimming.
    #[error("project identifier must not be empty")]
    EmptyProjectId,

    /// No open stage visit exists where exactly one is required.
    ///
    /// Indicates corrupted history upstream; the operation fails without
    /// mutating the task.
    #[error("task {task_id} has no open stage visit for stage '{stage}'")]
    NoOpenStageVisit {
        /// Task with the corrupted history.
        task_id: TaskId,
        /// Stage the task currently reports occupying.
        stage: StageId,
    },
}

/// Error returned while parsing stage identifiers from storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown stage id: {0}")]
pub struct ParseStageIdError(pub String);

/// Error returned while parsing role identifiers from storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Error returned while parsing priority levels from storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
