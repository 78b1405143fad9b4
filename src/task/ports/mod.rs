//! Port contracts for task tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

pub use repository::{
    ConditionalWrite, TaskEdit, TaskRemovalGuard, TaskRepository, TaskRepositoryError,
    TaskRepositoryResult,
};
