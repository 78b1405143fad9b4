//! Task status lifecycle.
//!
//! Statuses move strictly forward: `pending -> in_progress -> done`. No
//! status may be skipped and `done` is terminal.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Pending,
    /// Task is being worked on.
    InProgress,
    /// Task has been completed. Terminal.
    Done,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Returns whether a task in this status may move to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        can_transition(self, next)
    }

    /// Returns the statuses directly reachable from this one.
    #[must_use]
    pub const fn next_valid_states(self) -> &'static [Self] {
        next_valid_states(self)
    }

    /// Returns whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        next_valid_states(self).is_empty()
    }
}

/// Returns `true` iff `next` is directly reachable from `current`.
#[must_use]
pub const fn can_transition(current: TaskStatus, next: TaskStatus) -> bool {
    matches!(
        (current, next),
        (TaskStatus::Pending, TaskStatus::InProgress) | (TaskStatus::InProgress, TaskStatus::Done)
    )
}

/// Returns the forward adjacency of `current`; empty for terminal statuses.
#[must_use]
pub const fn next_valid_states(current: TaskStatus) -> &'static [TaskStatus] {
    match current {
        TaskStatus::Pending => &[TaskStatus::InProgress],
        TaskStatus::InProgress => &[TaskStatus::Done],
        TaskStatus::Done => &[],
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
