//! Domain model for tasks and settings.
//!
//! # Responsibility
//! - Define canonical data structures shared by stores, queries and alerts.
//! - Own field-level validation and defaulting rules.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod settings;
pub mod task;
