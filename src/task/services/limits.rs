//! Field length limits enforced at the request boundary.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::domain::TaskDomainError;

/// Character limits applied to task fields before they reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskFieldLimits {
    /// Maximum title length in characters.
    pub max_title_chars: usize,
    /// Maximum description length in characters.
    pub max_description_chars: usize,
}

impl Default for TaskFieldLimits {
    fn default() -> Self {
        Self {
            max_title_chars: 100,
            max_description_chars: 500,
        }
    }
}

/// Errors returned while loading field limits.
#[derive(Debug, Error)]
pub enum FieldLimitsError {
    /// The configuration file could not be read.
    #[error("failed to read field limits from {path}: {source}")]
    Read {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration document is not valid JSON for the limits.
    #[error("invalid field limits document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TaskFieldLimits {
    /// Parses limits from a JSON document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FieldLimitsError::Parse`] when the document is malformed.
    pub fn from_json(document: &str) -> Result<Self, FieldLimitsError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Reads limits from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`FieldLimitsError::Read`] when the file cannot be opened or
    /// read and [`FieldLimitsError::Parse`] when it is malformed.
    pub fn load(path: &Utf8Path) -> Result<Self, FieldLimitsError> {
        let read_error = |source: std::io::Error| FieldLimitsError::Read {
            path: path.to_string(),
            source,
        };
        let parent = path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            read_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no file name",
            ))
        })?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let document = dir.read_to_string(file_name).map_err(read_error)?;
        Self::from_json(&document)
    }

    /// Checks a title that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for blank titles and
    /// [`TaskDomainError::TitleTooLong`] above the limit.
    pub fn check_title(&self, title: &str) -> Result<(), TaskDomainError> {
        if title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        self.check_title_length(title)
    }

    /// Checks only the length bounds of a title, 1 to `max_title_chars`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for an empty string and
    /// [`TaskDomainError::TitleTooLong`] above the limit.
    pub fn check_title_length(&self, title: &str) -> Result<(), TaskDomainError> {
        let length = title.chars().count();
        if length == 0 {
            return Err(TaskDomainError::EmptyTitle);
        }
        if length > self.max_title_chars {
            return Err(TaskDomainError::TitleTooLong {
                length,
                limit: self.max_title_chars,
            });
        }
        Ok(())
    }

    /// Checks a description length.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DescriptionTooLong`] above the limit.
    pub fn check_description(&self, description: &str) -> Result<(), TaskDomainError> {
        let length = description.chars().count();
        if length > self.max_description_chars {
            return Err(TaskDomainError::DescriptionTooLong {
                length,
                limit: self.max_description_chars,
            });
        }
        Ok(())
    }
}
