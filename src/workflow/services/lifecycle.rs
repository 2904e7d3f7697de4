//! Service layer orchestrating task creation, transitions, and lookup.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use thiserror::Error;

use crate::workflow::{
    domain::{
        AssigneeDraft, NewTaskParams, Priority, ProjectId, RoleAssignments, Task, TaskDetails,
        TaskId, UserId, WorkflowError,
    },
    ports::{TaskRepository, TaskRepositoryError},
};

/// Request payload for creating a workflow task.
///
/// Assignee values arrive as raw identifier strings from the caller; blank
/// values count as not provided, matching how selection widgets submit
/// unfilled fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    created_by: String,
    pm: Option<String>,
    developer: Option<String>,
    tester: Option<String>,
    devops: Option<String>,
    qa: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    due_date: Option<NaiveDate>,
    project_id: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            created_by: created_by.into(),
            pm: None,
            developer: None,
            tester: None,
            devops: None,
            qa: None,
            description: None,
            priority: None,
            due_date: None,
            project_id: None,
        }
    }

    /// Sets the product manager assignee; defaults to the creator.
    #[must_use]
    pub fn with_pm(mut self, pm: impl Into<String>) -> Self {
        self.pm = Some(pm.into());
        self
    }

    /// Sets the developer assignee.
    #[must_use]
    pub fn with_developer(mut self, developer: impl Into<String>) -> Self {
        self.developer = Some(developer.into());
        self
    }

    /// Sets the tester assignee.
    #[must_use]
    pub fn with_tester(mut self, tester: impl Into<String>) -> Self {
        self.tester = Some(tester.into());
        self
    }

    /// Sets the DevOps assignee.
    #[must_use]
    pub fn with_devops(mut self, devops: impl Into<String>) -> Self {
        self.devops = Some(devops.into());
        self
    }

    /// Sets the QA reviewer assignee.
    #[must_use]
    pub fn with_qa(mut self, qa: impl Into<String>) -> Self {
        self.qa = Some(qa.into());
        self
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the task priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
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
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

/// Service-level errors for workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowServiceError {
    /// Domain validation or transition failure.
    #[error(transparent)]
    Domain(#[from] WorkflowError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for workflow service operations.
pub type WorkflowServiceResult<T> = Result<T, WorkflowServiceError>;

/// Workflow orchestration service.
///
/// Owns the load-mutate-store cycle for every task operation. Domain
/// mutations bump the task version, so a concurrent writer loses the
/// repository's optimistic version check instead of silently overwriting.
#[derive(Clone)]
pub struct WorkflowService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> WorkflowService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new workflow service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a task in the backlog and stores it.
    ///
    /// The product manager defaults to the creator; developer, tester,
    /// DevOps, and QA assignees are mandatory.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError`] when input validation fails or the
    /// repository rejects persistence.
    pub async fn create_task(&self, request: CreateTaskRequest) -> WorkflowServiceResult<Task> {
        let created_by = UserId::new(request.created_by)?;
        let draft = AssigneeDraft {
            pm: optional_user_id(request.pm)?,
            developer: optional_user_id(request.developer)?,
            tester: optional_user_id(request.tester)?,
            devops: optional_user_id(request.devops)?,
            qa: optional_user_id(request.qa)?,
        };
        let assignees = RoleAssignments::from_draft(draft, &created_by)?;

        let mut params = NewTaskParams::new(request.title, created_by, assignees);
        if let Some(description) = request.description {
            params = params.with_description(description);
        }
        if let Some(priority) = request.priority {
            params = params.with_priority(priority);
        }
        if let Some(due_date) = request.due_date {
            params = params.with_due_date(due_date);
        }
        if let Some(project_raw) = request.project_id {
            params = params.with_project(ProjectId::new(project_raw)?);
        }

        let task = Task::new(params, &*self.clock)?;
        self.repository.insert(&task).await?;
        Ok(task)
    }

    /// Advances a task to its next stage and stores the result.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError`] when the actor id is blank, the
    /// task does not exist, the transition is illegal, or persistence
    /// fails.
    pub async fn advance_task(&self, task_id: TaskId, actor: &str) -> WorkflowServiceResult<Task> {
        let actor_id = UserId::new(actor)?;
        let mut task = self.find_by_id_or_error(task_id).await?;
        task.advance(&actor_id, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Rejects a task back to its configured reject target and stores the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError`] when the actor id is blank, the
    /// reason is blank, the task does not exist, the transition is illegal,
    /// or persistence fails.
    pub async fn reject_task(
        &self,
        task_id: TaskId,
        actor: &str,
        reason: &str,
    ) -> WorkflowServiceResult<Task> {
        let actor_id = UserId::new(actor)?;
        let mut task = self.find_by_id_or_error(task_id).await?;
        task.reject(&actor_id, reason, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Overwrites descriptive task fields and stores the result.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError`] when the task does not exist or
    /// persistence fails.
    pub async fn update_details(
        &self,
        task_id: TaskId,
        details: TaskDetails,
    ) -> WorkflowServiceResult<Task> {
        let mut task = self.find_by_id_or_error(task_id).await?;
        task.apply_details(details, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_task(&self, task_id: TaskId) -> WorkflowServiceResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Returns all tasks in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_tasks(&self) -> WorkflowServiceResult<Vec<Task>> {
        Ok(self.repository.list().await?)
    }

    /// Returns the tasks belonging to a project, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_project_tasks(
        &self,
        project_id: &ProjectId,
    ) -> WorkflowServiceResult<Vec<Task>> {
        Ok(self.repository.list_by_project(project_id).await?)
    }

    async fn find_by_id_or_error(&self, task_id: TaskId) -> WorkflowServiceResult<Task> {
        let found = self.repository.find_by_id(task_id).await?;
        found.ok_or(WorkflowServiceError::Repository(
            TaskRepositoryError::NotFound(task_id),
        ))
    }
}

/// Maps a raw assignee value to a validated id, treating blanks as absent.
fn optional_user_id(value: Option<String>) -> Result<Option<UserId>, WorkflowError> {
    match value {
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => UserId::new(raw).map(Some),
        None => Ok(None),
    }
}
