//! In-memory integration tests for end-to-end workflow lifecycles.

use rstest::rstest;
use stagehand::workflow::domain::{Priority, StageId, Task, TaskDetails};

use super::helpers::{TestService, complete_request, drive_to, service};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_delivery_flow_reaches_done(service: TestService) -> Result<(), eyre::Report> {
    let created = service
        .create_task(complete_request("Checkout flow"))
        .await
        .expect("task creation should succeed");

    let done = drive_to(&service, created.id(), StageId::Done, "pia").await?;

    assert_eq!(done.current_stage(), StageId::Done);
    assert!(done.completed());
    assert!(!done.rejected());
    assert_eq!(done.version(), 13);
    assert_eq!(done.history().len(), 13);

    let listed = service.list_tasks().await.expect("listing should succeed");
    assert_eq!(listed, &[done]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rework_loop_completes_with_sticky_rejection(
    service: TestService,
) -> Result<(), eyre::Report> {
    let created = service
        .create_task(complete_request("Checkout flow"))
        .await
        .expect("task creation should succeed");
    drive_to(&service, created.id(), StageId::TestInProgress, "pia").await?;

    let rejected = service
        .reject_task(created.id(), "tara", "Fails on empty cart")
        .await
        .expect("rejection should succeed");
    assert_eq!(rejected.current_stage(), StageId::DevPending);
    assert!(rejected.rejected());
    assert_eq!(rejected.rejection_reason(), Some("Fails on empty cart"));

    let done = drive_to(&service, created.id(), StageId::Done, "pia").await?;
    assert!(done.completed());
    assert!(done.rejected(), "rejection flag should survive completion");
    assert_eq!(done.history().len(), 18);
    assert_eq!(done.rejections().len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn details_update_persists_mid_pipeline(service: TestService) -> Result<(), eyre::Report> {
    let created = service
        .create_task(complete_request("Checkout flow").with_priority(Priority::Low))
        .await
        .expect("task creation should succeed");
    drive_to(&service, created.id(), StageId::DevInProgress, "pia").await?;

    let patch = TaskDetails::new().with_description("Cover the guest checkout path");
    let updated = service
        .update_details(created.id(), patch)
        .await
        .expect("details update should succeed");

    assert_eq!(updated.description(), "Cover the guest checkout path");
    assert_eq!(updated.priority(), Priority::Low);
    assert_eq!(updated.current_stage(), StageId::DevInProgress);

    let fetched = service
        .find_task(created.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, Some(updated));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn independent_tasks_progress_without_interference(
    service: TestService,
) -> Result<(), eyre::Report> {
    let first = service
        .create_task(complete_request("Checkout flow"))
        .await
        .expect("first creation should succeed");
    let second = service
        .create_task(complete_request("Search results"))
        .await
        .expect("second creation should succeed");

    drive_to(&service, first.id(), StageId::Deploying, "pia").await?;

    let stored_second = service
        .find_task(second.id())
        .await
        .expect("lookup should succeed")
        .ok_or_else(|| eyre::eyre!("second task should still be stored"))?;
    assert_eq!(stored_second.current_stage(), StageId::Backlog);
    assert_eq!(stored_second.version(), 1);

    let listed = service.list_tasks().await.expect("listing should succeed");
    let titles: Vec<_> = listed.iter().map(Task::title).collect();
    assert_eq!(titles, ["Checkout flow", "Search results"]);
    Ok(())
}
