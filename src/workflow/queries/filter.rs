//! Predicate-based task filtering.

use crate::workflow::domain::{Priority, ProjectId, Role, Task, registry};

/// Conjunctive filter over a task collection.
///
/// Every populated predicate must hold for a task to pass. An empty filter
/// passes everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    search: Option<String>,
    role: Option<Role>,
    priority: Option<Priority>,
    project: Option<ProjectId>,
}

impl TaskFilter {
    /// Creates a filter that passes every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to tasks whose title or description contains the term,
    /// case-insensitively. Blank terms are ignored.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let trimmed = term.into().trim().to_owned();
        if !trimmed.is_empty() {
            self.search = Some(trimmed);
        }
        self
    }

    /// Restricts to tasks whose current stage is owned by the role.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Restricts to tasks with the given priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts to tasks belonging to the given project.
    #[must_use]
    pub fn with_project(mut self, project: ProjectId) -> Self {
        self.project = Some(project);
        self
    }

    /// Reports whether the task satisfies every populated predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task)
            && self.matches_role(task)
            && self.matches_priority(task)
            && self.matches_project(task)
    }

    fn matches_search(&self, task: &Task) -> bool {
        self.search.as_ref().is_none_or(|term| {
            let needle = term.to_lowercase();
            task.title().to_lowercase().contains(&needle)
                || task.description().to_lowercase().contains(&needle)
        })
    }

    fn matches_role(&self, task: &Task) -> bool {
        self.role
            .is_none_or(|role| registry::role_owns_stage(role, task.current_stage()))
    }

    fn matches_priority(&self, task: &Task) -> bool {
        self.priority.is_none_or(|priority| task.priority() == priority)
    }

    fn matches_project(&self, task: &Task) -> bool {
        self.project
            .as_ref()
            .is_none_or(|project| task.project_id() == Some(project))
    }
}

/// Returns the tasks passing the filter, preserving collection order.
#[must_use]
pub fn filter_tasks<'t>(tasks: &'t [Task], filter: &TaskFilter) -> Vec<&'t Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}
