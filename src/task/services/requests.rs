//! Request payloads accepted by the task service.

use super::TaskFieldLimits;
use crate::task::domain::TaskDomainError;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(crate) title: String,
    pub(crate) description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates the payload against field limits.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the title is blank or either field
    /// is too long.
    pub fn validate(&self, limits: &TaskFieldLimits) -> Result<(), TaskDomainError> {
        limits.check_title(&self.title)?;
        if let Some(description) = &self.description {
            limits.check_description(description)?;
        }
        Ok(())
    }
}

/// Request payload for editing a task's title or description.
///
/// An absent field is left unchanged. A blank title is ignored. An empty
/// description clears the text while keeping the field present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns whether the request asks for at least one real change.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        let has_title = self
            .title
            .as_deref()
            .is_some_and(|title| !title.trim().is_empty());
        has_title || self.description.is_some()
    }

    /// Validates the length of whichever fields are present.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when a present field is outside its
    /// length bounds.
    pub fn validate(&self, limits: &TaskFieldLimits) -> Result<(), TaskDomainError> {
        if let Some(title) = &self.title {
            limits.check_title_length(title)?;
        }
        if let Some(description) = &self.description {
            limits.check_description(description)?;
        }
        Ok(())
    }
}
