//! Concurrent in-memory task repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{ConditionalWrite, TaskEdit, TaskRemovalGuard, TaskRepository, TaskRepositoryResult},
};

const FIRST_TASK_ID: u64 = 1;

/// Thread-safe in-memory task repository.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    state: Arc<InMemoryTaskState>,
}

#[derive(Debug)]
struct InMemoryTaskState {
    tasks: DashMap<TaskId, Task>,
    next_id: AtomicU64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(InMemoryTaskState {
                tasks: DashMap::new(),
                next_id: AtomicU64::new(FIRST_TASK_ID),
            }),
        }
    }

    fn allocate_id(&self) -> TaskId {
        TaskId::new(self.state.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Collects matching tasks, newest first.
    fn collect_sorted(&self, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .state
            .tasks
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        sort_newest_first(&mut tasks);
        tasks
    }

    fn count_matching(&self, predicate: impl Fn(&Task) -> bool) -> usize {
        self.state
            .tasks
            .iter()
            .filter(|entry| predicate(entry.value()))
            .count()
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Orders by creation time descending; equal timestamps fall back to the
/// later-issued identifier first.
fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| {
        right
            .created_at()
            .cmp(&left.created_at())
            .then_with(|| right.id().cmp(&left.id()))
    });
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let stored = if task.id().is_assigned() {
            task.clone()
        } else {
            task.clone().with_id(self.allocate_id())
        };
        self.state.tasks.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.state.tasks.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        Ok(self.collect_sorted(|_| true))
    }

    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        Ok(self.collect_sorted(|task| task.status() == status))
    }

    async fn search_by_title(&self, query: &str) -> TaskRepositoryResult<Vec<Task>> {
        let needle = query.to_lowercase();
        Ok(self.collect_sorted(|task| task.title().to_lowercase().contains(&needle)))
    }

    async fn modify(
        &self,
        id: TaskId,
        edit: TaskEdit<'_>,
    ) -> TaskRepositoryResult<ConditionalWrite> {
        // The shard write guard is held until the edit is committed.
        let Some(mut entry) = self.state.tasks.get_mut(&id) else {
            return Ok(ConditionalWrite::Missing);
        };
        let mut candidate = entry.value().clone();
        if !edit(&mut candidate) {
            return Ok(ConditionalWrite::Declined(candidate));
        }
        *entry.value_mut() = candidate.clone();
        Ok(ConditionalWrite::Applied(candidate))
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        Ok(self.state.tasks.remove(&id).is_some())
    }

    async fn remove_if(
        &self,
        id: TaskId,
        guard: TaskRemovalGuard<'_>,
    ) -> TaskRepositoryResult<ConditionalWrite> {
        let outcome = match self.state.tasks.entry(id) {
            Entry::Vacant(_) => ConditionalWrite::Missing,
            Entry::Occupied(entry) => {
                if guard(entry.get()) {
                    ConditionalWrite::Applied(entry.remove())
                } else {
                    ConditionalWrite::Declined(entry.get().clone())
                }
            }
        };
        Ok(outcome)
    }

    async fn count_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<usize> {
        Ok(self.count_matching(|task| task.status() == status))
    }

    async fn count_all(&self) -> TaskRepositoryResult<usize> {
        Ok(self.state.tasks.len())
    }

    async fn exists(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        Ok(self.state.tasks.contains_key(&id))
    }

    async fn clear(&self) -> TaskRepositoryResult<()> {
        self.state.tasks.clear();
        self.state.next_id.store(FIRST_TASK_ID, Ordering::SeqCst);
        Ok(())
    }
}
