//! In-memory integration tests for task operations.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::helpers::{TestService, repository, service_over};
use rstest::{fixture, rstest};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId, TaskStatus},
    ports::TaskRepository,
    services::{CreateTaskRequest, ErrorKind, TaskServiceError, UpdateTaskRequest},
};

#[fixture]
fn service(repository: Arc<InMemoryTaskRepository>) -> TestService {
    service_over(&repository)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_crud_round_through_the_service(service: TestService) {
    let created = service
        .create(CreateTaskRequest::new("Implement login").with_description("Auth flow"))
        .await
        .expect("task creation should succeed");
    let updated = service
        .update(
            created.id(),
            UpdateTaskRequest::new().with_title("Implement OAuth login"),
        )
        .await
        .expect("update should succeed");
    let started = service
        .change_status(created.id(), TaskStatus::InProgress)
        .await
        .expect("transition should succeed");

    assert_eq!(updated.title(), "Implement OAuth login");
    assert_eq!(updated.description(), Some("Auth flow"));
    assert_eq!(started.title(), "Implement OAuth login");
    assert_eq!(started.next_valid_states(), &[TaskStatus::Done]);

    service
        .remove(created.id())
        .await
        .expect("removal should succeed");
    let missing = service
        .get_by_id(created.id())
        .await
        .expect_err("removed task should be gone");
    assert_eq!(missing.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_are_newest_first(service: TestService) {
    for title in ["first", "second", "third"] {
        service
            .create(CreateTaskRequest::new(title))
            .await
            .expect("task creation should succeed");
    }

    let listing = service.list_all().await.expect("listing should succeed");
    let pending = service
        .list_by_status(TaskStatus::Pending)
        .await
        .expect("listing should succeed");

    let titles: Vec<&str> = listing.tasks.iter().map(Task::title).collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
    assert_eq!(pending.tasks, listing.tasks);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_serialises_status_counts_by_name(service: TestService) {
    service
        .create(CreateTaskRequest::new("Serialise me"))
        .await
        .expect("task creation should succeed");

    let listing = service.list_all().await.expect("listing should succeed");
    let value = serde_json::to_value(&listing).expect("serialise listing");

    assert_eq!(value["total"], 1);
    assert_eq!(value["counts_by_status"]["pending"], 1);
    assert_eq!(value["counts_by_status"]["in_progress"], 0);
    assert_eq!(value["counts_by_status"]["done"], 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn statistics_serialise_rendered_percentage_and_summary(service: TestService) {
    let login = service
        .create(CreateTaskRequest::new("Implement login"))
        .await
        .expect("task creation should succeed");
    service
        .create(CreateTaskRequest::new("Write tests"))
        .await
        .expect("task creation should succeed");
    for status in [TaskStatus::InProgress, TaskStatus::Done] {
        service
            .change_status(login.id(), status)
            .await
            .expect("lifecycle step should succeed");
    }

    let stats = service.statistics().await.expect("statistics should succeed");
    let value = serde_json::to_value(&stats).expect("serialise statistics");

    assert_eq!(value["total"], 2);
    assert_eq!(value["completion_percentage"], "50.0%");
    assert_eq!(
        value["summary"],
        "2 tasks total: 1 pending, 0 in progress, 1 done"
    );
    assert_eq!(value["counts_by_status"]["done"], 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn statistics_serialise_one_decimal_for_thirds(service: TestService) {
    for title in ["first", "second", "third"] {
        service
            .create(CreateTaskRequest::new(title))
            .await
            .expect("task creation should succeed");
    }
    let started = service
        .list_all()
        .await
        .expect("listing should succeed")
        .tasks
        .into_iter()
        .next()
        .expect("listing should not be empty");
    for status in [TaskStatus::InProgress, TaskStatus::Done] {
        service
            .change_status(started.id(), status)
            .await
            .expect("lifecycle step should succeed");
    }

    let stats = service.statistics().await.expect("statistics should succeed");
    let value = serde_json::to_value(&stats).expect("serialise statistics");

    assert_eq!(value["completion_percentage"], "33.3%");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_handlers_share_one_store(repository: Arc<InMemoryTaskRepository>) {
    const HANDLERS: u64 = 32;
    let service = Arc::new(service_over(&repository));

    let handles: Vec<_> = (0..HANDLERS)
        .map(|index| {
            let handler = Arc::clone(&service);
            tokio::spawn(async move {
                let task = handler
                    .create(CreateTaskRequest::new(format!("handler {index}")))
                    .await?;
                handler
                    .change_status(task.id(), TaskStatus::InProgress)
                    .await?;
                Ok::<TaskId, TaskServiceError>(task.id())
            })
        })
        .collect();

    let mut ids = BTreeSet::new();
    for handle in handles {
        let id = handle
            .await
            .expect("handler should not panic")
            .expect("handler operations should succeed");
        ids.insert(id);
    }

    let expected: BTreeSet<TaskId> = (1..=HANDLERS).map(TaskId::new).collect();
    assert_eq!(ids, expected);
    assert_eq!(
        repository
            .count_by_status(TaskStatus::InProgress)
            .await
            .expect("count"),
        32
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clearing_the_store_restarts_ids(repository: Arc<InMemoryTaskRepository>) {
    let service = service_over(&repository);
    service
        .create(CreateTaskRequest::new("before clear"))
        .await
        .expect("task creation should succeed");

    repository.clear().await.expect("clear should succeed");
    let after = service
        .create(CreateTaskRequest::new("after clear"))
        .await
        .expect("task creation should succeed");

    assert_eq!(after.id(), TaskId::new(1));
}
