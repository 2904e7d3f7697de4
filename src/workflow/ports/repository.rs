//! Repository port for task persistence and lookup.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::workflow::domain::{ProjectId, Task, TaskId};

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations must preserve insertion order in [`TaskRepository::list`]
/// and enforce the optimistic version check in [`TaskRepository::update`]:
/// a write is accepted only when the incoming task's version is exactly one
/// ahead of the stored version.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::VersionConflict`] when the incoming
    /// version is not exactly one ahead of the stored version.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks in insertion order.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks belonging to the given project, in insertion
    /// order.
    async fn list_by_project(&self, project_id: &ProjectId) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The write lost an optimistic-concurrency race.
    #[error(
        "version conflict on task {task_id}: stored version {stored}, attempted {attempted}"
    )]
    VersionConflict {
        /// Task the stale write targeted.
        task_id: TaskId,
        /// Version currently persisted.
        stored: u64,
        /// Version carried by the rejected write.
        attempted: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
