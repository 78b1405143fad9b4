//! Application services for task tracking.

mod error;
mod limits;
mod operations;
mod requests;
mod views;

pub use error::{BusinessRuleViolation, ErrorKind, TaskServiceError, TaskServiceResult};
pub use limits::{FieldLimitsError, TaskFieldLimits};
pub use operations::TaskService;
pub use requests::{CreateTaskRequest, UpdateTaskRequest};
pub use views::{TaskListing, TaskStatistics};
