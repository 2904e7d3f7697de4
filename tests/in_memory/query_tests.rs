//! In-memory integration tests for read models over serviced tasks.

use rstest::rstest;
use stagehand::workflow::{
    domain::{Priority, ProjectId, Role, StageId, Task},
    queries::{StageColumn, TaskFilter, WorkflowSummary, board_columns, filter_tasks, summarize},
};

use super::helpers::{TestService, complete_request, drive_to, service};

/// Seeds one task per lifecycle bucket and returns the stored snapshots.
async fn seed_board(service: &TestService) -> eyre::Result<Vec<Task>> {
    let backlog_request = complete_request("Checkout flow")
        .with_priority(Priority::High)
        .with_project("proj-shop");
    service.create_task(backlog_request).await?;

    let developing = service
        .create_task(complete_request("Search results").with_project("proj-shop"))
        .await?;
    drive_to(service, developing.id(), StageId::DevInProgress, "pia").await?;

    let rework_request = complete_request("Invoice export")
        .with_priority(Priority::Low)
        .with_project("proj-billing");
    let reworked = service.create_task(rework_request).await?;
    drive_to(service, reworked.id(), StageId::TestInProgress, "pia").await?;
    service
        .reject_task(reworked.id(), "tara", "Broken totals")
        .await?;

    let shipped = service
        .create_task(complete_request("Login hardening").with_priority(Priority::High))
        .await?;
    drive_to(service, shipped.id(), StageId::Done, "pia").await?;

    Ok(service.list_tasks().await?)
}

fn column_titles<'t>(columns: &[StageColumn<'t>], stage: StageId) -> Vec<&'t str> {
    columns
        .iter()
        .find(|column| column.stage.id == stage)
        .map(|column| column.tasks.iter().map(|task| task.title()).collect())
        .unwrap_or_default()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_reflects_serviced_tasks(service: TestService) -> Result<(), eyre::Report> {
    let tasks = seed_board(&service).await?;
    let columns = board_columns(&tasks);

    assert_eq!(columns.len(), 13);
    assert_eq!(column_titles(&columns, StageId::Backlog), ["Checkout flow"]);
    assert_eq!(
        column_titles(&columns, StageId::DevPending),
        ["Invoice export"]
    );
    assert_eq!(
        column_titles(&columns, StageId::DevInProgress),
        ["Search results"]
    );
    assert_eq!(column_titles(&columns, StageId::Done), ["Login hardening"]);
    assert!(column_titles(&columns, StageId::QaInReview).is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summary_buckets_serviced_lifecycles(service: TestService) -> Result<(), eyre::Report> {
    let tasks = seed_board(&service).await?;

    assert_eq!(
        summarize(&tasks),
        WorkflowSummary {
            total: 4,
            completed: 1,
            rejected: 1,
            in_progress: 1,
            backlog: 1,
        }
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_compose_over_serviced_tasks(service: TestService) -> Result<(), eyre::Report> {
    let tasks = seed_board(&service).await?;

    let developer_queue = filter_tasks(&tasks, &TaskFilter::new().with_role(Role::Developer));
    let queue_titles: Vec<_> = developer_queue.iter().map(|task| task.title()).collect();
    assert_eq!(queue_titles, ["Search results", "Invoice export"]);

    let urgent = filter_tasks(&tasks, &TaskFilter::new().with_priority(Priority::High));
    let urgent_titles: Vec<_> = urgent.iter().map(|task| task.title()).collect();
    assert_eq!(urgent_titles, ["Checkout flow", "Login hardening"]);

    let shop = filter_tasks(&tasks, &TaskFilter::new().with_project(ProjectId::new("proj-shop")?));
    let shop_titles: Vec<_> = shop.iter().map(|task| task.title()).collect();
    assert_eq!(shop_titles, ["Checkout flow", "Search results"]);

    let urgent_search = filter_tasks(
        &tasks,
        &TaskFilter::new()
            .with_priority(Priority::High)
            .with_search("login"),
    );
    let found_titles: Vec<_> = urgent_search.iter().map(|task| task.title()).collect();
    assert_eq!(found_titles, ["Login hardening"]);
    Ok(())
}
