//! In-memory task repository for tests and embedded use.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::workflow::{
    domain::{ProjectId, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Tasks are returned in insertion order; updates enforce the optimistic
/// version check required by the port contract.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    order: Vec<TaskId>,
    project_index: HashMap<ProjectId, Vec<TaskId>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn index_project(state: &mut InMemoryTaskState, task: &Task) {
    if let Some(project_id) = task.project_id() {
        state
            .project_index
            .entry(project_id.clone())
            .or_default()
            .push(task.id());
    }
}

/// Removes a task ID from a project index entry, cleaning it up if empty.
fn remove_from_project_index(
    index: &mut HashMap<ProjectId, Vec<TaskId>>,
    task_id: TaskId,
    project_id: &ProjectId,
) {
    if let Some(ids) = index.get_mut(project_id) {
        ids.retain(|id| *id != task_id);
        if ids.is_empty() {
            index.remove(project_id);
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        state.order.push(task.id());
        index_project(&mut state, task);
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let old_task = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .clone();

        if old_task.version() + 1 != task.version() {
            return Err(TaskRepositoryError::VersionConflict {
                task_id: task.id(),
                stored: old_task.version(),
                attempted: task.version(),
            });
        }

        // Re-index when the owning project changed.
        if old_task.project_id() != task.project_id() {
            if let Some(old_project) = old_task.project_id() {
                remove_from_project_index(&mut state.project_index, task.id(), old_project);
            }
            index_project(&mut state, task);
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.tasks.get(id).cloned())
            .collect())
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let tasks = state
            .project_index
            .get(project_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.tasks.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(tasks)
    }
}
