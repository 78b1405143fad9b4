//! Repository port for task storage, lookup, and removal.

use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// In-place edit applied to a stored task. Returns `true` to commit.
pub type TaskEdit<'a> = Box<dyn FnOnce(&mut Task) -> bool + Send + 'a>;

/// Condition checked against a stored task before it is removed.
pub type TaskRemovalGuard<'a> = Box<dyn FnOnce(&Task) -> bool + Send + 'a>;

/// Outcome of a conditional write against a single key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionalWrite {
    /// No task is stored under the key.
    Missing,
    /// The condition declined the write; carries the stored task unchanged.
    Declined(Task),
    /// The write took effect; carries the task as written or removed.
    Applied(Task),
}

/// Task storage contract.
///
/// Implementations own the canonical copy of every task and hand out
/// independent clones. They must tolerate concurrent callers: identifier
/// allocation is atomic and each operation is consistent per key.
///
/// Listings are ordered by creation time, newest first.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a task and returns the stored copy.
    ///
    /// A task carrying [`TaskId::UNASSIGNED`] receives the next identifier.
    /// Any other identifier overwrites the entry under that key.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the backing store
    /// fails.
    async fn save(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks currently in `status`.
    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks whose title contains `query`, ignoring case.
    async fn search_by_title(&self, query: &str) -> TaskRepositoryResult<Vec<Task>>;

    /// Edits the stored task under `id` without letting another writer
    /// interleave.
    ///
    /// `edit` runs against a copy of the stored task; the copy replaces the
    /// stored entry only when `edit` returns `true`. A missing key is never
    /// re-created.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the backing store
    /// fails.
    async fn modify(
        &self,
        id: TaskId,
        edit: TaskEdit<'_>,
    ) -> TaskRepositoryResult<ConditionalWrite>;

    /// Deletes a task. Returns `true` when an entry was removed.
    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Deletes the task under `id` when `guard` accepts it, checking and
    /// removing as one step.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the backing store
    /// fails.
    async fn remove_if(
        &self,
        id: TaskId,
        guard: TaskRemovalGuard<'_>,
    ) -> TaskRepositoryResult<ConditionalWrite>;

    /// Counts the tasks currently in `status`.
    async fn count_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<usize>;

    /// Counts every stored task.
    async fn count_all(&self) -> TaskRepositoryResult<usize>;

    /// Returns whether a task with `id` is stored.
    async fn exists(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Drops every task and restarts identifier allocation at 1.
    ///
    /// Intended for test isolation.
    async fn clear(&self) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
