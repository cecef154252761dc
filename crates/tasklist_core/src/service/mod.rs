//! Use-case facade over the stores and the pure query/alert functions.
//!
//! # Responsibility
//! - Wire task and settings stores to one KV backend and one clock.
//! - Re-derive views on demand; stores never push updates.

pub mod todo_service;
