//! Domain model for task tracking.
//!
//! The task domain owns the status lifecycle and the guarded mutations of a
//! single task record. Storage and orchestration live outside this boundary.

mod error;
mod ids;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::{TaskStatus, can_transition, next_valid_states};
pub use task::{PersistedTaskData, Task};
