//! Task entity and its guarded mutations.

use super::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A tracked unit of work.
///
/// Status changes and field edits go through [`Task::apply_status`] and
/// [`Task::apply_edits`]; callers hold independent copies and must write
/// them back to the store explicitly.
///
/// Serialises with its `next_valid_states`. There is no deserialisation
/// path; stored tasks are rebuilt through [`Task::from_persisted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Stored identifier, or [`TaskId::UNASSIGNED`] to request allocation.
    pub id: TaskId,
    /// Stored title.
    pub title: String,
    /// Stored description, if any.
    pub description: Option<String>,
    /// Stored lifecycle status.
    pub status: TaskStatus,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Stored latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task that has not been stored yet.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::UNASSIGNED,
            title: title.into(),
            description,
            status: TaskStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from stored data without lifecycle checks.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at.max(data.created_at),
        }
    }

    /// Returns a copy carrying a store-issued identifier.
    #[must_use]
    pub(crate) fn with_id(mut self, id: TaskId) -> Self {
        self.id = id;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the statuses this task may move to next.
    #[must_use]
    pub const fn next_valid_states(&self) -> &'static [TaskStatus] {
        self.status.next_valid_states()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `next` when the lifecycle allows it.
    ///
    /// Returns `false` and leaves the task untouched when the transition is
    /// not permitted.
    pub fn apply_status(&mut self, next: TaskStatus, clock: &impl Clock) -> bool {
        if !self.status.can_transition_to(next) {
            return false;
        }
        self.status = next;
        self.touch(clock);
        true
    }

    /// Replaces the title and description.
    ///
    /// A blank or absent title keeps the current one. A present description,
    /// including an empty one, replaces the current one. The modification
    /// timestamp is refreshed whenever this is called.
    pub fn apply_edits(
        &mut self,
        title: Option<String>,
        description: Option<String>,
        clock: &impl Clock,
    ) {
        if let Some(new_title) = title.filter(|candidate| !candidate.trim().is_empty()) {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = Some(new_description);
        }
        self.touch(clock);
    }

    /// Updates `updated_at`, never moving it before `created_at`.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc().max(self.created_at);
    }
}

impl Serialize for Task {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("Task", 7)?;
        record.serialize_field("id", &self.id)?;
        record.serialize_field("title", &self.title)?;
        record.serialize_field("description", &self.description)?;
        record.serialize_field("status", &self.status)?;
        record.serialize_field("next_valid_states", self.next_valid_states())?;
        record.serialize_field("created_at", &self.created_at)?;
        record.serialize_field("updated_at", &self.updated_at)?;
        record.end()
    }
}
