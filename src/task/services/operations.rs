//! Task service orchestrating the repository and the status lifecycle.

use super::{
    BusinessRuleViolation, CreateTaskRequest, TaskFieldLimits, TaskListing, TaskServiceError,
    TaskServiceResult, TaskStatistics, UpdateTaskRequest,
};
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{ConditionalWrite, TaskRepository},
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Task service enforcing lifecycle and deletion rules.
///
/// The service is cheap to clone and may be shared across concurrent
/// request handlers.
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    limits: TaskFieldLimits,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            limits: self.limits,
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service using the default field limits.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_limits(repository, clock, TaskFieldLimits::default())
    }

    /// Creates a service using explicit field limits.
    #[must_use]
    pub const fn with_limits(repository: Arc<R>, clock: Arc<C>, limits: TaskFieldLimits) -> Self {
        Self {
            repository,
            clock,
            limits,
        }
    }

    /// Returns the field limits in force.
    #[must_use]
    pub const fn limits(&self) -> &TaskFieldLimits {
        &self.limits
    }

    /// Creates a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the request fails field
    /// validation or [`TaskServiceError::Repository`] when storage fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        request.validate(&self.limits)?;
        let task = Task::new(request.title, request.description, &*self.clock);
        let stored = self.repository.save(&task).await?;
        info!(task_id = %stored.id(), title = stored.title(), "task created");
        Ok(stored)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist.
    pub async fn get_by_id(&self, id: TaskId) -> TaskServiceResult<Task> {
        debug!(task_id = %id, "looking up task");
        self.load(id).await
    }

    /// Lists every task with counts for every status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when storage fails.
    pub async fn list_all(&self) -> TaskServiceResult<TaskListing> {
        let tasks = self.repository.list_all().await?;
        let counts = self.count_every_status().await?;
        debug!(total = tasks.len(), "listed tasks");
        Ok(TaskListing::new(tasks, counts))
    }

    /// Lists the tasks in `status`.
    ///
    /// The counts report only the queried status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when storage fails.
    pub async fn list_by_status(&self, status: TaskStatus) -> TaskServiceResult<TaskListing> {
        let tasks = self.repository.list_by_status(status).await?;
        let counts = BTreeMap::from([(status, tasks.len())]);
        debug!(%status, total = tasks.len(), "listed tasks by status");
        Ok(TaskListing::new(tasks, counts))
    }

    /// Edits a task's title or description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when a present field fails
    /// validation, [`TaskServiceError::NotFound`] when the task does not
    /// exist, and [`BusinessRuleViolation::EmptyUpdate`] when the request
    /// carries no usable change.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskServiceResult<Task> {
        request.validate(&self.limits)?;
        let has_changes = request.has_changes();
        let UpdateTaskRequest { title, description } = request;
        let clock = &*self.clock;
        let outcome = self
            .repository
            .modify(
                id,
                Box::new(move |task: &mut Task| {
                    if has_changes {
                        task.apply_edits(title, description, clock);
                    }
                    has_changes
                }),
            )
            .await?;

        match outcome {
            ConditionalWrite::Missing => Err(TaskServiceError::NotFound(id)),
            ConditionalWrite::Declined(_) => Err(BusinessRuleViolation::EmptyUpdate.into()),
            ConditionalWrite::Applied(stored) => {
                info!(task_id = %stored.id(), title = stored.title(), "task updated");
                Ok(stored)
            }
        }
    }

    /// Moves a task to `requested` along the lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist
    /// and [`TaskServiceError::InvalidTransition`] when `requested` is not
    /// reachable from the current status.
    pub async fn change_status(
        &self,
        id: TaskId,
        requested: TaskStatus,
    ) -> TaskServiceResult<Task> {
        let clock = &*self.clock;
        let outcome = self
            .repository
            .modify(id, Box::new(move |task: &mut Task| task.apply_status(requested, clock)))
            .await?;

        match outcome {
            ConditionalWrite::Missing => Err(TaskServiceError::NotFound(id)),
            ConditionalWrite::Declined(task) => {
                let current = task.status();
                warn!(
                    task_id = %id,
                    from = %current,
                    to = %requested,
                    "rejected status transition"
                );
                Err(TaskServiceError::InvalidTransition {
                    current,
                    requested,
                    allowed: current.next_valid_states().to_vec(),
                })
            }
            ConditionalWrite::Applied(stored) => {
                info!(task_id = %id, to = %requested, "task status changed");
                Ok(stored)
            }
        }
    }

    /// Deletes a task that has not been completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist
    /// and [`BusinessRuleViolation::TerminalTaskDeletion`] when it is done.
    pub async fn remove(&self, id: TaskId) -> TaskServiceResult<()> {
        let outcome = self
            .repository
            .remove_if(id, Box::new(|task: &Task| !task.status().is_terminal()))
            .await?;

        match outcome {
            ConditionalWrite::Missing => Err(TaskServiceError::NotFound(id)),
            ConditionalWrite::Declined(_) => {
                warn!(task_id = %id, "rejected removal of a done task");
                Err(BusinessRuleViolation::TerminalTaskDeletion(id).into())
            }
            ConditionalWrite::Applied(removed) => {
                info!(task_id = %id, title = removed.title(), "task removed");
                Ok(())
            }
        }
    }

    /// Finds tasks whose title contains `query`, ignoring case.
    ///
    /// The counts cover every status over the matching tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessRuleViolation::BlankSearchQuery`] when `query` is
    /// blank.
    pub async fn search_by_title(&self, query: &str) -> TaskServiceResult<TaskListing> {
        if query.trim().is_empty() {
            return Err(BusinessRuleViolation::BlankSearchQuery.into());
        }
        let tasks = self.repository.search_by_title(query).await?;
        debug!(query, total = tasks.len(), "searched tasks by title");
        Ok(TaskListing::counted(tasks))
    }

    /// Computes totals and the completion percentage over every task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when storage fails.
    pub async fn statistics(&self) -> TaskServiceResult<TaskStatistics> {
        let counts = self.count_every_status().await?;
        let total = self.repository.count_all().await?;
        Ok(TaskStatistics::new(total, counts))
    }

    async fn load(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    async fn count_every_status(&self) -> TaskServiceResult<BTreeMap<TaskStatus, usize>> {
        let mut counts = BTreeMap::new();
        for status in TaskStatus::ALL {
            counts.insert(status, self.repository.count_by_status(status).await?);
        }
        Ok(counts)
    }
}
