//! Result views returned by listing and statistics operations.

use crate::task::domain::{Task, TaskStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// A set of tasks with per-status counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskListing {
    /// Matching tasks, newest first.
    pub tasks: Vec<Task>,
    /// Number of tasks in `tasks`.
    pub total: usize,
    /// Task counts keyed by status.
    pub counts_by_status: BTreeMap<TaskStatus, usize>,
}

impl TaskListing {
    pub(crate) fn new(tasks: Vec<Task>, counts_by_status: BTreeMap<TaskStatus, usize>) -> Self {
        Self {
            total: tasks.len(),
            tasks,
            counts_by_status,
        }
    }

    /// Builds a listing whose counts are taken from `tasks` and cover every
    /// status.
    pub(crate) fn counted(tasks: Vec<Task>) -> Self {
        let counts = TaskStatus::ALL
            .into_iter()
            .map(|status| {
                let count = tasks.iter().filter(|task| task.status() == status).count();
                (status, count)
            })
            .collect();
        Self::new(tasks, counts)
    }

    /// Returns the count recorded for `status`, if the listing reports it.
    #[must_use]
    pub fn count_for(&self, status: TaskStatus) -> Option<usize> {
        self.counts_by_status.get(&status).copied()
    }
}

/// Aggregate figures over every stored task.
///
/// Serialises the completion percentage as rendered text, e.g. `"50.0%"`,
/// alongside the one-line summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStatistics {
    /// Number of stored tasks.
    pub total: usize,
    /// Task counts for every status.
    pub counts_by_status: BTreeMap<TaskStatus, usize>,
    /// Share of done tasks, from 0 to 100.
    #[serde(skip)]
    pub completion_percentage: f64,
    #[serde(rename = "completion_percentage")]
    completion_text: String,
    summary: String,
}

impl TaskStatistics {
    pub(crate) fn new(total: usize, counts_by_status: BTreeMap<TaskStatus, usize>) -> Self {
        let count = |status: TaskStatus| counts_by_status.get(&status).copied().unwrap_or_default();
        let percentage = completion_percentage(count(TaskStatus::Done), total);
        let summary = format!(
            "{total} tasks total: {} pending, {} in progress, {} done",
            count(TaskStatus::Pending),
            count(TaskStatus::InProgress),
            count(TaskStatus::Done),
        );
        Self {
            total,
            completion_percentage: percentage,
            completion_text: format!("{percentage:.1}%"),
            summary,
            counts_by_status,
        }
    }

    /// Returns the count for `status`.
    #[must_use]
    pub fn count_for(&self, status: TaskStatus) -> usize {
        self.counts_by_status
            .get(&status)
            .copied()
            .unwrap_or_default()
    }

    /// Returns the completion percentage with one decimal, e.g. `50.0%`.
    #[must_use]
    pub fn completion_percentage_text(&self) -> &str {
        &self.completion_text
    }

    /// Returns the one-line human summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "task counts are far below f64 integer precision and the ratio is presentational"
)]
fn completion_percentage(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    done as f64 / total as f64 * 100.0
}
