//! Shared helpers for in-memory workflow integration tests.

use std::sync::Arc;

use eyre::OptionExt;
use mockable::DefaultClock;
use rstest::fixture;
use stagehand::workflow::{
    adapters::InMemoryTaskRepository,
    domain::{
        AssigneeDraft, NewTaskParams, ProjectId, RoleAssignments, StageId, Task, TaskId, UserId,
    },
    services::{CreateTaskRequest, WorkflowService},
};

/// Service type shared by the in-memory integration suites.
pub type TestService = WorkflowService<InMemoryTaskRepository, DefaultClock>;

/// Provides a fresh service over an empty in-memory repository.
#[fixture]
pub fn service() -> TestService {
    WorkflowService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Builds a creation request with the standard five-person team.
pub fn complete_request(title: &str) -> CreateTaskRequest {
    CreateTaskRequest::new(title, "pia")
        .with_developer("dana")
        .with_tester("tara")
        .with_devops("oren")
        .with_qa("quinn")
}

/// Builds a standalone backlog task for direct repository tests.
///
/// # Errors
///
/// Returns an error when assignment validation or task creation fails.
pub fn sample_task(title: &str) -> eyre::Result<Task> {
    build_task(title, None)
}

/// Builds a standalone backlog task attached to a project.
///
/// # Errors
///
/// Returns an error when assignment validation or task creation fails.
pub fn project_task(title: &str, project: &str) -> eyre::Result<Task> {
    build_task(title, Some(project))
}

fn build_task(title: &str, project: Option<&str>) -> eyre::Result<Task> {
    let creator = UserId::new("pia")?;
    let draft = AssigneeDraft {
        pm: None,
        developer: Some(UserId::new("dana")?),
        tester: Some(UserId::new("tara")?),
        devops: Some(UserId::new("oren")?),
        qa: Some(UserId::new("quinn")?),
    };
    let assignees = RoleAssignments::from_draft(draft, &creator)?;
    let mut params = NewTaskParams::new(title, creator, assignees);
    if let Some(project) = project {
        params = params.with_project(ProjectId::new(project)?);
    }
    let task = Task::new(params, &DefaultClock)?;
    Ok(task)
}

/// Advances a stored task through the service until it reaches `stage`.
///
/// # Errors
///
/// Returns an error when the task is missing, an advance fails, or the
/// stage is never reached.
pub async fn drive_to(
    service: &TestService,
    task_id: TaskId,
    stage: StageId,
    actor: &str,
) -> eyre::Result<Task> {
    let mut task = service
        .find_task(task_id)
        .await?
        .ok_or_eyre("task not stored")?;
    for _ in 0..13 {
        if task.current_stage() == stage {
            return Ok(task);
        }
        task = service.advance_task(task_id, actor).await?;
    }
    eyre::bail!("never reached stage {stage}");
}
