//! Task aggregate root and the advance/reject state machine.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    Label, Priority, ProjectId, Rejection, RoleAssignments, StageId, StageVisit, Subtask,
    TaskDetails, TaskId, TransitionAction, TransitionKind, UserId, WorkflowError, registry,
};

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskParams {
    /// Task title, validated non-empty at construction.
    pub title: String,
    /// User creating the task; also the seed history actor.
    pub created_by: UserId,
    /// Locked role assignments.
    pub assignees: RoleAssignments,
    /// Free-text description, stored verbatim.
    pub description: String,
    /// Priority level.
    pub priority: Priority,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional owning project.
    pub project_id: Option<ProjectId>,
}

impl NewTaskParams {
    /// Creates parameters with required fields and empty descriptive data.
    #[must_use]
    pub fn new(title: impl Into<String>, created_by: UserId, assignees: RoleAssignments) -> Self {
        Self {
            title: title.into(),
            created_by,
            assignees,
            description: String::new(),
            priority: Priority::default(),
            due_date: None,
            project_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the owning project.
    #[must_use]
    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

/// Task aggregate root.
///
/// A task always occupies exactly one pipeline stage and carries the full
/// audit trail of every stage it has visited. All workflow mutation goes
/// through [`Task::advance`] and [`Task::reject`]; descriptive fields change
/// only through [`Task::apply_details`]. Every mutation bumps the
/// optimistic-concurrency `version`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    priority: Priority,
    due_date: Option<NaiveDate>,
    labels: Vec<Label>,
    subtasks: Vec<Subtask>,
    attachments: Vec<Value>,
    #[serde(rename = "currentStageId")]
    current_stage: StageId,
    assignees: RoleAssignments,
    assignees_locked: bool,
    stage_history: Vec<StageVisit>,
    completed: bool,
    rejected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection_reason: Option<String>,
    rejection_history: Vec<Rejection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_id: Option<ProjectId>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
}

impl Task {
    /// Creates a new task in the backlog with one seeded history visit.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::EmptyTitle`] when the title is empty after
    /// trimming.
    pub fn new(params: NewTaskParams, clock: &impl Clock) -> Result<Self, WorkflowError> {
        let trimmed_title = params.title.trim();
        if trimmed_title.is_empty() {
            return Err(WorkflowError::EmptyTitle);
        }

        let timestamp = clock.utc();
        let seed_visit = StageVisit::opened(
            StageId::Backlog,
            TransitionAction::Created,
            params.created_by.clone(),
            timestamp,
        );

        Ok(Self {
            id: TaskId::new(),
            title: trimmed_title.to_owned(),
            description: params.description,
            priority: params.priority,
            due_date: params.due_date,
            labels: Vec::new(),
            subtasks: Vec::new(),
            attachments: Vec::new(),
            current_stage: StageId::Backlog,
            assignees: params.assignees,
            assignees_locked: true,
            stage_history: vec![seed_visit],
            completed: false,
            rejected: false,
            rejection_reason: None,
            rejection_history: Vec::new(),
            project_id: params.project_id,
            created_by: params.created_by,
            created_at: timestamp,
            updated_at: timestamp,
            version: 1,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority level.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date, if set.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the labels attached to the task.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the subtask checklist.
    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    /// Returns the opaque attachment payloads.
    #[must_use]
    pub fn attachments(&self) -> &[Value] {
        &self.attachments
    }

    /// Returns the stage the task currently occupies.
    #[must_use]
    pub const fn current_stage(&self) -> StageId {
        self.current_stage
    }

    /// Returns the locked role assignments.
    #[must_use]
    pub const fn assignees(&self) -> &RoleAssignments {
        &self.assignees
    }

    /// Returns `true`; assignments are locked for every created task.
    #[must_use]
    pub const fn assignees_locked(&self) -> bool {
        self.assignees_locked
    }

    /// Returns the full stage history, oldest visit first.
    #[must_use]
    pub fn history(&self) -> &[StageVisit] {
        &self.stage_history
    }

    /// Returns `true` once the task has reached the terminal stage.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns `true` once the task has ever been rejected.
    ///
    /// The flag is sticky: advancing after a rejection does not clear it.
    #[must_use]
    pub const fn rejected(&self) -> bool {
        self.rejected
    }

    /// Returns the most recent rejection reason, if any.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Returns the rejection log, oldest first.
    #[must_use]
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejection_history
    }

    /// Returns the owning project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn created_by(&self) -> &UserId {
        &self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the latest mutation.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the optimistic-concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns `true` when the current stage allows `advance`.
    #[must_use]
    pub const fn can_advance(&self) -> bool {
        registry::stage(self.current_stage).can_advance()
    }

    /// Returns `true` when the current stage allows `reject`.
    #[must_use]
    pub const fn can_reject(&self) -> bool {
        registry::stage(self.current_stage).can_reject()
    }

    /// Returns the open stage visit, when history is consistent.
    #[must_use]
    pub fn open_visit(&self) -> Option<&StageVisit> {
        let current = self.current_stage;
        self.stage_history
            .iter()
            .find(|visit| visit.stage_id == current && visit.is_open())
    }

    /// Returns how long the task has occupied its current stage.
    ///
    /// Returns `None` when no open visit exists; mutation paths treat that
    /// state as an error, read paths report it as absent.
    #[must_use]
    pub fn time_in_current_stage(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.open_visit().map(|visit| now - visit.entered_at)
    }

    /// Moves the task forward to the configured next stage.
    ///
    /// Closes the open visit and opens one for the next stage with the same
    /// timestamp. Entering the terminal stage sets `completed`. A prior
    /// rejection flag is not cleared.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::IllegalTransition`] when the current stage
    /// has no next stage, or [`WorkflowError::NoOpenStageVisit`] when the
    /// history is corrupt. The task is unchanged on error.
    pub fn advance(&mut self, actor: &UserId, clock: &impl Clock) -> Result<(), WorkflowError> {
        let Some(next) = registry::stage(self.current_stage).next_stage else {
            return Err(WorkflowError::IllegalTransition {
                task_id: self.id,
                stage: self.current_stage,
                action: TransitionKind::Advance,
            });
        };

        let now = clock.utc();
        self.close_open_visit(now)?;
        self.stage_history.push(StageVisit::opened(
            next,
            TransitionAction::Advanced,
            actor.clone(),
            now,
        ));
        self.current_stage = next;
        if next.is_terminal() {
            self.completed = true;
        }
        self.touch_at(now);
        Ok(())
    }

    /// Sends the task back to the configured reject target.
    ///
    /// Records the reason in the new visit and in the rejection log, marks
    /// the task rejected, and retains the reason until a later rejection
    /// overwrites it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::IllegalTransition`] when the current stage
    /// has no reject target, [`WorkflowError::EmptyRejectionReason`] when
    /// the reason is blank, or [`WorkflowError::NoOpenStageVisit`] when the
    /// history is corrupt. The task is unchanged on error.
    pub fn reject(
        &mut self,
        actor: &UserId,
        reason: &str,
        clock: &impl Clock,
    ) -> Result<(), WorkflowError> {
        let from_stage = self.current_stage;
        let Some(target) = registry::stage(from_stage).reject_target else {
            return Err(WorkflowError::IllegalTransition {
                task_id: self.id,
                stage: from_stage,
                action: TransitionKind::Reject,
            });
        };

        let trimmed = reason.trim();
        if trimmed.is_empty() {
            return Err(WorkflowError::EmptyRejectionReason { task_id: self.id });
        }

        let now = clock.utc();
        self.close_open_visit(now)?;
        self.stage_history.push(
            StageVisit::opened(target, TransitionAction::Rejected, actor.clone(), now)
                .with_reason(trimmed),
        );
        self.rejection_history
            .push(Rejection::new(from_stage, target, trimmed, now, actor.clone()));
        self.current_stage = target;
        self.rejected = true;
        self.rejection_reason = Some(trimmed.to_owned());
        self.touch_at(now);
        Ok(())
    }

    /// Overwrites the descriptive fields present in the patch.
    pub fn apply_details(&mut self, details: TaskDetails, clock: &impl Clock) {
        if let Some(description) = details.description {
            self.description = description;
        }
        if let Some(labels) = details.labels {
            self.labels = labels;
        }
        if let Some(subtasks) = details.subtasks {
            self.subtasks = subtasks;
        }
        if let Some(attachments) = details.attachments {
            self.attachments = attachments;
        }
        self.touch_at(clock.utc());
    }

    /// Stamps the exit time on the open visit for the current stage.
    fn close_open_visit(&mut self, now: DateTime<Utc>) -> Result<(), WorkflowError> {
        let current = self.current_stage;
        let task_id = self.id;
        let open = self
            .stage_history
            .iter_mut()
            .find(|visit| visit.stage_id == current && visit.is_open())
            .ok_or(WorkflowError::NoOpenStageVisit {
                task_id,
                stage: current,
            })?;
        open.exited_at = Some(now);
        Ok(())
    }

    /// Records a mutation: bumps the version and the `updated_at` stamp.
    fn touch_at(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.version += 1;
    }
}
