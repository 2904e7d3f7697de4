//! Audit trail types recording every stage a task has occupied.
//!
//! Each task carries an append-only list of stage visits with enter and
//! exit timestamps, plus a separate rejection log optimised for audit
//! display. Only transition operations append to either list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{StageId, UserId};

/// How a task arrived in a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionAction {
    /// Initial visit seeded at task creation.
    Created,
    /// Forward transition along the pipeline.
    Advanced,
    /// Backward transition with a recorded reason.
    Rejected,
}

/// One stay in one stage.
///
/// A visit is open while the task occupies the stage (`exited_at` is
/// `None`) and closes when the task moves on. Exactly one visit per task is
/// open at any time, and it always matches the task's current stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageVisit {
    /// Stage the task occupied.
    pub stage_id: StageId,

    /// When the task entered the stage.
    pub entered_at: DateTime<Utc>,

    /// When the task left the stage; `None` while the visit is open.
    pub exited_at: Option<DateTime<Utc>>,

    /// How the task arrived in the stage.
    pub action: TransitionAction,

    /// User who performed the transition.
    pub actor_id: UserId,

    /// Rejection reason, recorded only when `action` is `Rejected`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StageVisit {
    /// Creates an open visit entered at the given instant.
    #[must_use]
    pub const fn opened(
        stage_id: StageId,
        action: TransitionAction,
        actor_id: UserId,
        entered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            stage_id,
            entered_at,
            exited_at: None,
            action,
            actor_id,
            reason: None,
        }
    }

    /// Attaches the rejection reason recorded with this visit.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Returns `true` while the task still occupies the stage.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.exited_at.is_none()
    }
}

/// One rejection event in a task's life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    /// Stage the task was rejected from.
    pub from_stage: StageId,

    /// Stage the task was sent back to.
    pub to_stage: StageId,

    /// Reason supplied by the rejecting user.
    pub reason: String,

    /// When the rejection happened.
    pub at: DateTime<Utc>,

    /// User who rejected the task.
    pub actor_id: UserId,
}

impl Rejection {
    /// Creates a rejection record.
    #[must_use]
    pub fn new(
        from_stage: StageId,
        to_stage: StageId,
        reason: impl Into<String>,
        at: DateTime<Utc>,
        actor_id: UserId,
    ) -> Self {
        Self {
            from_stage,
            to_stage,
            reason: reason.into(),
            at,
            actor_id,
        }
    }
}
