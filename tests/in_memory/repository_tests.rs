//! Contract tests for the in-memory task repository.

use mockable::DefaultClock;
use rstest::rstest;
use stagehand::workflow::{
    adapters::InMemoryTaskRepository,
    domain::{ProjectId, Task, UserId},
    ports::{TaskRepository, TaskRepositoryError},
};

use super::helpers::{project_task, sample_task};

fn actor() -> eyre::Result<UserId> {
    Ok(UserId::new("dana")?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_then_find_returns_stored_task() -> Result<(), eyre::Report> {
    let repository = InMemoryTaskRepository::new();
    let task = sample_task("Checkout flow")?;

    repository.insert(&task).await?;
    let found = repository.find_by_id(task.id()).await?;

    assert_eq!(found, Some(task));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_insert_is_rejected() -> Result<(), eyre::Report> {
    let repository = InMemoryTaskRepository::new();
    let task = sample_task("Checkout flow")?;
    repository.insert(&task).await?;

    let result = repository.insert(&task).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_missing_task_reports_not_found() -> Result<(), eyre::Report> {
    let repository = InMemoryTaskRepository::new();
    let task = sample_task("Checkout flow")?;

    let result = repository.update(&task).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::NotFound(id)) if id == task.id()
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_snapshot_update_loses_version_race() -> Result<(), eyre::Report> {
    let repository = InMemoryTaskRepository::new();
    let mut task = sample_task("Checkout flow")?;
    repository.insert(&task).await?;

    // Two writers advance the same version-1 snapshot.
    let mut stale = task.clone();
    task.advance(&actor()?, &DefaultClock)?;
    repository.update(&task).await?;
    stale.advance(&actor()?, &DefaultClock)?;

    let err = repository
        .update(&stale)
        .await
        .expect_err("stale write should lose the race");
    let TaskRepositoryError::VersionConflict {
        task_id,
        stored,
        attempted,
    } = err
    else {
        eyre::bail!("expected a version conflict, got {err}");
    };
    assert_eq!(task_id, task.id());
    assert_eq!(stored, 2);
    assert_eq!(attempted, 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_skipping_a_version_is_rejected() -> Result<(), eyre::Report> {
    let repository = InMemoryTaskRepository::new();
    let mut task = sample_task("Checkout flow")?;
    repository.insert(&task).await?;

    // Version 3 arrives while version 1 is stored.
    task.advance(&actor()?, &DefaultClock)?;
    task.advance(&actor()?, &DefaultClock)?;

    let result = repository.update(&task).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::VersionConflict {
            stored: 1,
            attempted: 3,
            ..
        })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fetched_tasks_are_isolated_snapshots() -> Result<(), eyre::Report> {
    let repository = InMemoryTaskRepository::new();
    let task = sample_task("Checkout flow")?;
    repository.insert(&task).await?;

    let mut fetched = repository
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should be stored"))?;
    fetched.advance(&actor()?, &DefaultClock)?;

    let stored = repository
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should still be stored"))?;
    assert_eq!(stored.version(), 1, "mutating a fetched copy must not leak");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_preserves_insertion_order() -> Result<(), eyre::Report> {
    let repository = InMemoryTaskRepository::new();
    for title in ["First", "Second", "Third"] {
        repository.insert(&sample_task(title)?).await?;
    }

    let listed = repository.list().await?;
    let titles: Vec<_> = listed.iter().map(Task::title).collect();

    assert_eq!(titles, ["First", "Second", "Third"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_by_project_filters_in_insertion_order() -> Result<(), eyre::Report> {
    let repository = InMemoryTaskRepository::new();
    repository
        .insert(&project_task("Checkout flow", "proj-shop")?)
        .await?;
    repository
        .insert(&project_task("Invoice export", "proj-billing")?)
        .await?;
    repository
        .insert(&project_task("Search results", "proj-shop")?)
        .await?;
    repository.insert(&sample_task("Login hardening")?).await?;

    let shop = repository.list_by_project(&ProjectId::new("proj-shop")?).await?;
    let titles: Vec<_> = shop.iter().map(Task::title).collect();
    assert_eq!(titles, ["Checkout flow", "Search results"]);

    let unknown = repository.list_by_project(&ProjectId::new("proj-ops")?).await?;
    assert!(unknown.is_empty());
    Ok(())
}
