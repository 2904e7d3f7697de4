//! Progress rollups over task collections.
//!
//! All percentages are integer, rounded half-up, clamped to `0..=100`.
//! Empty denominators report zero rather than erroring.

use crate::workflow::domain::{Project, Role, StageId, Task, User, UserId, registry};

/// Headline counts for a task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowSummary {
    /// All tasks.
    pub total: usize,
    /// Tasks that reached the terminal stage.
    pub completed: usize,
    /// Tasks currently flagged rejected and not yet completed.
    pub rejected: usize,
    /// Tasks past the backlog that are neither completed nor rejected.
    pub in_progress: usize,
    /// Tasks still in the backlog.
    pub backlog: usize,
}

/// Progress rollup for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeStats {
    /// The user the rollup describes.
    pub user: User,
    /// Tasks naming the user as the assignee for their role.
    pub total_assigned: usize,
    /// Assigned tasks the user is credited for.
    pub completed_or_passed: usize,
    /// `completed_or_passed` over `total_assigned`, as a percentage.
    pub progress_percent: u8,
}

/// Progress rollup for one role across its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamStats {
    /// The role the rollup describes.
    pub role: Role,
    /// Users holding the role.
    pub members: usize,
    /// Tasks assigned to any member for this role.
    pub total_assigned: usize,
    /// Assigned tasks credited to the role.
    pub completed_or_passed: usize,
    /// `completed_or_passed` over `total_assigned`, as a percentage.
    pub progress_percent: u8,
}

/// Progress rollup for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStats {
    /// The project the rollup describes.
    pub project: Project,
    /// Tasks belonging to the project.
    pub total: usize,
    /// Belonging tasks that reached the terminal stage.
    pub completed: usize,
    /// `completed` over `total`, as a percentage.
    pub progress_percent: u8,
}

/// Computes headline counts for the collection.
///
/// A task falls into exactly one bucket besides `total`: completed wins
/// over the sticky rejected flag, which wins over backlog membership.
#[must_use]
pub fn summarize(tasks: &[Task]) -> WorkflowSummary {
    let mut summary = WorkflowSummary::default();
    for task in tasks {
        summary.total += 1;
        if task.completed() {
            summary.completed += 1;
        } else if task.rejected() {
            summary.rejected += 1;
        } else if task.current_stage() == StageId::Backlog {
            summary.backlog += 1;
        } else {
            summary.in_progress += 1;
        }
    }
    summary
}

/// Computes per-user progress over the tasks assigned to each user's role.
#[must_use]
pub fn per_assignee_stats(tasks: &[Task], users: &[User]) -> Vec<AssigneeStats> {
    users
        .iter()
        .map(|user| {
            let assigned: Vec<&Task> = tasks
                .iter()
                .filter(|task| task.assignees().assignee(user.role) == &user.id)
                .collect();
            let credited = assigned
                .iter()
                .filter(|task| credits_role(task, user.role))
                .count();
            AssigneeStats {
                user: user.clone(),
                total_assigned: assigned.len(),
                completed_or_passed: credited,
                progress_percent: percent(credited, assigned.len()),
            }
        })
        .collect()
}

/// Computes the per-role rollup across the given users.
///
/// Every role appears in the result, including roles with no members.
#[must_use]
pub fn team_stats(tasks: &[Task], users: &[User]) -> Vec<TeamStats> {
    Role::ALL
        .iter()
        .map(|&role| {
            let member_ids: Vec<&UserId> = users
                .iter()
                .filter(|user| user.role == role)
                .map(|user| &user.id)
                .collect();
            let assigned: Vec<&Task> = tasks
                .iter()
                .filter(|task| member_ids.contains(&task.assignees().assignee(role)))
                .collect();
            let credited = assigned
                .iter()
                .filter(|task| credits_role(task, role))
                .count();
            TeamStats {
                role,
                members: member_ids.len(),
                total_assigned: assigned.len(),
                completed_or_passed: credited,
                progress_percent: percent(credited, assigned.len()),
            }
        })
        .collect()
}

/// Computes per-project completion over the given projects.
#[must_use]
pub fn project_stats(tasks: &[Task], projects: &[Project]) -> Vec<ProjectStats> {
    projects
        .iter()
        .map(|project| {
            let owned: Vec<&Task> = tasks
                .iter()
                .filter(|task| task.project_id() == Some(&project.id))
                .collect();
            let completed = owned.iter().filter(|task| task.completed()).count();
            ProjectStats {
                project: project.clone(),
                total: owned.len(),
                completed,
                progress_percent: percent(completed, owned.len()),
            }
        })
        .collect()
}

/// Returns how far along the pipeline the task's current stage sits.
///
/// The backlog reports 8% (stage 1 of 13) and the terminal stage 100%.
#[must_use]
pub fn pipeline_progress(task: &Task) -> u8 {
    let order = registry::pipeline();
    let Some(index) = order.iter().position(|&id| id == task.current_stage()) else {
        return 0;
    };
    percent(index + 1, order.len())
}

/// A task counts toward a role once it sits in a stage the role does not
/// own, excluding the backlog. Completed tasks always count. Reject loops
/// can re-credit upstream roles while rework is pending.
fn credits_role(task: &Task, role: Role) -> bool {
    if task.completed() {
        return true;
    }
    let stage = task.current_stage();
    stage != StageId::Backlog && !registry::role_owns_stage(role, stage)
}

#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "half-up integer rounding relies on truncating division"
)]
fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let scaled = (part * 200 + whole) / (whole * 2);
    u8::try_from(scaled.min(100)).unwrap_or(100)
}
