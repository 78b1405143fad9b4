//! Taskboard: in-memory task tracking with a guarded status lifecycle.
//!
//! This crate provides the core of a task service: a forward-only status
//! state machine, a concurrent task store, and a service layer that enforces
//! transition, deletion, and update rules through typed errors. Request
//! routing and response shaping are left to the caller.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: Concrete implementations of ports (in-memory store, seed data)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, storage, and operations

pub mod task;
