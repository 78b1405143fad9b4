//! Tests for sample data loading.

use std::sync::Arc;

use super::helpers::{repository, service_over};
use mockable::DefaultClock;
use rstest::rstest;
use taskboard::task::{
    adapters::{memory::InMemoryTaskRepository, seed::seed_sample_tasks},
    domain::{TaskId, TaskStatus},
    ports::TaskRepository,
    services::{BusinessRuleViolation, TaskServiceError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeding_stores_every_sample_with_sequential_ids(
    repository: Arc<InMemoryTaskRepository>,
) {
    let seeded = seed_sample_tasks(&*repository, &DefaultClock)
        .await
        .expect("seeding should succeed");

    let ids: Vec<TaskId> = seeded.iter().map(|task| task.id()).collect();
    assert_eq!(ids, (1..=5).map(TaskId::new).collect::<Vec<_>>());
    assert_eq!(repository.count_all().await.expect("count"), 5);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_statuses_cover_the_lifecycle(repository: Arc<InMemoryTaskRepository>) {
    seed_sample_tasks(&*repository, &DefaultClock)
        .await
        .expect("seeding should succeed");
    let service = service_over(&repository);

    let stats = service.statistics().await.expect("statistics should succeed");

    assert_eq!(stats.count_for(TaskStatus::Pending), 2);
    assert_eq!(stats.count_for(TaskStatus::InProgress), 1);
    assert_eq!(stats.count_for(TaskStatus::Done), 2);
    assert_eq!(stats.completion_percentage_text(), "40.0%");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_done_tasks_are_protected(repository: Arc<InMemoryTaskRepository>) {
    let seeded = seed_sample_tasks(&*repository, &DefaultClock)
        .await
        .expect("seeding should succeed");
    let service = service_over(&repository);
    let done = seeded
        .iter()
        .find(|task| task.status() == TaskStatus::Done)
        .expect("a done sample exists");

    let result = service.remove(done.id()).await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Validation(
            BusinessRuleViolation::TerminalTaskDeletion(_)
        ))
    ));
}
