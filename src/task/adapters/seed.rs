//! Sample data loader for demonstrations.

use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryResult},
};
use mockable::Clock;

const SAMPLE_TASKS: [(&str, &str, TaskStatus); 5] = [
    (
        "Implement authentication",
        "Add login and token-based authentication",
        TaskStatus::InProgress,
    ),
    (
        "Write API documentation",
        "Document every REST endpoint",
        TaskStatus::Pending,
    ),
    (
        "Configure automated deployment",
        "Set up a CI/CD pipeline",
        TaskStatus::Pending,
    ),
    (
        "Service unit tests",
        "Cover the business rules with tests",
        TaskStatus::Done,
    ),
    (
        "Input validation",
        "Validate request payloads at the boundary",
        TaskStatus::Done,
    ),
];

/// Stores the sample tasks and returns the stored copies.
///
/// Statuses are written directly, bypassing the lifecycle, so the sample set
/// covers every status.
///
/// # Errors
///
/// Returns the repository error when a task cannot be stored.
pub async fn seed_sample_tasks<R>(
    repository: &R,
    clock: &impl Clock,
) -> TaskRepositoryResult<Vec<Task>>
where
    R: TaskRepository + ?Sized,
{
    let mut stored = Vec::with_capacity(SAMPLE_TASKS.len());
    for (title, description, status) in SAMPLE_TASKS {
        let now = clock.utc();
        let task = Task::from_persisted(PersistedTaskData {
            id: TaskId::UNASSIGNED,
            title: title.to_owned(),
            description: Some(description.to_owned()),
            status,
            created_at: now,
            updated_at: now,
        });
        stored.push(repository.save(&task).await?);
    }
    tracing::info!(count = stored.len(), "seeded sample tasks");
    Ok(stored)
}
