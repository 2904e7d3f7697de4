//! Given steps for workflow transition BDD scenarios.

use eyre::WrapErr;
use rstest_bdd_macros::given;
use stagehand::workflow::{domain::StageId, services::CreateTaskRequest};

use super::world::{WorkflowWorld, run_async};

#[given(r#"a task titled "{title}" created by "{creator}""#)]
fn task_created(
    world: &mut WorkflowWorld,
    title: String,
    creator: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title, creator)
        .with_developer("dana")
        .with_tester("tara")
        .with_devops("oren")
        .with_qa("quinn");
    let created = run_async(world.service.create_task(request))
        .wrap_err("create task for transition scenario")?;
    world.current_task = Some(created);
    Ok(())
}

#[given(r#"the task has advanced to stage "{stage}""#)]
fn task_advanced_to(world: &mut WorkflowWorld, stage: String) -> Result<(), eyre::Report> {
    let target = StageId::try_from(stage.as_str())
        .map_err(|err| eyre::eyre!("invalid stage in scenario: {err}"))?;
    let task = world
        .current_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))?;
    let task_id = task.id();

    let mut current = task.clone();
    for _ in 0..13 {
        if current.current_stage() == target {
            world.current_task = Some(current);
            return Ok(());
        }
        current = run_async(world.service.advance_task(task_id, "pia"))
            .wrap_err("advance task in scenario setup")?;
    }
    Err(eyre::eyre!("never reached stage {target} in scenario setup"))
}
