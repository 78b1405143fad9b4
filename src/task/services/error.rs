//! Service-level errors for task operations.

use crate::task::{
    domain::{TaskDomainError, TaskId, TaskStatus},
    ports::TaskRepositoryError,
};
use std::fmt;
use thiserror::Error;

/// Business rules rejected by the service beyond field validation.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BusinessRuleViolation {
    /// An update named neither a title nor a description.
    #[error("at least one field (title or description) must be provided for an update")]
    EmptyUpdate,

    /// A title search was requested with a blank query.
    #[error("search query must not be blank")]
    BlankSearchQuery,

    /// Deletion was requested for a completed task.
    #[error("task {0} is done and is kept for history; done tasks cannot be removed")]
    TerminalTaskDeletion(TaskId),
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// No task exists with the identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// The requested status is not reachable from the current one.
    #[error(
        "invalid transition from '{current}' to '{requested}'; valid transitions from '{current}': {}",
        StatusList(.allowed)
    )]
    InvalidTransition {
        /// Status the task is in.
        current: TaskStatus,
        /// Status that was requested.
        requested: TaskStatus,
        /// Statuses reachable from `current`.
        allowed: Vec<TaskStatus>,
    },

    /// A business rule rejected the request.
    #[error(transparent)]
    Validation(#[from] BusinessRuleViolation),

    /// Field validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Classification of service errors for boundary mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The referenced task does not exist.
    NotFound,
    /// The requested status change is not allowed.
    InvalidTransition,
    /// The request broke a field or business rule.
    Validation,
    /// An unexpected failure; details are not exposed to clients.
    Internal,
}

const INTERNAL_ERROR_MESSAGE: &str = "an unexpected error occurred, please try again";

impl TaskServiceError {
    /// Returns the boundary classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::Validation(_) | Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(_) => ErrorKind::Internal,
        }
    }

    /// Returns a message safe to show to a client.
    ///
    /// Internal failures are logged and replaced with a generic message.
    #[must_use]
    pub fn client_message(&self) -> String {
        if self.kind() == ErrorKind::Internal {
            tracing::error!(error = %self, "unexpected task service failure");
            return INTERNAL_ERROR_MESSAGE.to_owned();
        }
        self.to_string()
    }
}

struct StatusList<'a>(&'a [TaskStatus]);

impl fmt::Display for StatusList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, status) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(status.as_str())?;
        }
        f.write_str("]")
    }
}
