//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while validating task field values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the configured character limit.
    #[error("task title is {length} characters long, the limit is {limit}")]
    TitleTooLong {
        /// Observed length in characters.
        length: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// The task description exceeds the configured character limit.
    #[error("task description is {length} characters long, the limit is {limit}")]
    DescriptionTooLong {
        /// Observed length in characters.
        length: usize,
        /// Configured maximum.
        limit: usize,
    },
}

/// Error returned while parsing a task status from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
