//! Then steps for workflow transition BDD scenarios.

use eyre::WrapErr;
use rstest_bdd_macros::then;
use stagehand::workflow::{
    domain::{StageId, Task, WorkflowError},
    services::WorkflowServiceError,
};

use super::world::{WorkflowWorld, run_async};

/// Fetches the scenario task back out of the store for assertions.
fn stored_task(world: &WorkflowWorld) -> Result<Task, eyre::Report> {
    let task = world
        .current_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))?;
    run_async(world.service.find_task(task.id()))
        .wrap_err("fetch task for assertion")?
        .ok_or_else(|| eyre::eyre!("task missing from the store"))
}

#[then(r#"the task sits in stage "{stage}""#)]
fn task_sits_in_stage(world: &WorkflowWorld, stage: String) -> Result<(), eyre::Report> {
    let expected = StageId::try_from(stage.as_str())
        .map_err(|err| eyre::eyre!("invalid expected stage in scenario: {err}"))?;
    let task = stored_task(world)?;
    if task.current_stage() != expected {
        return Err(eyre::eyre!(
            "expected stage {expected}, found {}",
            task.current_stage()
        ));
    }
    Ok(())
}

#[then("the task version is {version:u64}")]
fn task_version_is(world: &WorkflowWorld, version: u64) -> Result<(), eyre::Report> {
    let task = stored_task(world)?;
    if task.version() != version {
        return Err(eyre::eyre!(
            "expected version {version}, found {}",
            task.version()
        ));
    }
    Ok(())
}

#[then(r#"the task is flagged rejected with reason "{reason}""#)]
fn task_flagged_rejected(world: &WorkflowWorld, reason: String) -> Result<(), eyre::Report> {
    let task = stored_task(world)?;
    if !task.rejected() {
        return Err(eyre::eyre!("expected the task to carry the rejected flag"));
    }
    if task.rejection_reason() != Some(reason.as_str()) {
        return Err(eyre::eyre!(
            "expected rejection reason {reason:?}, found {:?}",
            task.rejection_reason()
        ));
    }
    Ok(())
}

#[then("the stage history records {count:u64} visits")]
fn stage_history_records(world: &WorkflowWorld, count: u64) -> Result<(), eyre::Report> {
    let expected =
        usize::try_from(count).map_err(|err| eyre::eyre!("visit count out of range: {err}"))?;
    let task = stored_task(world)?;
    if task.history().len() != expected {
        return Err(eyre::eyre!(
            "expected {expected} visits, found {}",
            task.history().len()
        ));
    }
    Ok(())
}

#[then("the transition fails as illegal")]
fn transition_fails_as_illegal(world: &WorkflowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(
        result,
        Err(WorkflowServiceError::Domain(
            WorkflowError::IllegalTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected an illegal-transition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the transition fails for lack of a reason")]
fn transition_fails_for_missing_reason(world: &WorkflowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(
        result,
        Err(WorkflowServiceError::Domain(
            WorkflowError::EmptyRejectionReason { .. }
        ))
    ) {
        return Err(eyre::eyre!("expected an empty-reason error, got {result:?}"));
    }
    Ok(())
}
