//! Adapter implementations for task tracking ports.

pub mod memory;
pub mod seed;
