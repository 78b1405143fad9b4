//! Task tracking with a forward-only status lifecycle.
//!
//! Tasks move `pending -> in_progress -> done`; done tasks are terminal and
//! cannot be removed. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
