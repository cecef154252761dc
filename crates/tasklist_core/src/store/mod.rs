//! Stateful stores owning the task collection and the settings singleton.
//!
//! # Responsibility
//! - Apply validated mutations in memory, then persist the full snapshot.
//! - Degrade storage failures to safe defaults at load time.
//!
//! # Invariants
//! - A failed validation or not-found lookup never mutates or persists.
//! - Persistence runs only after an in-memory mutation succeeded.
//! - Write failures are logged and retried by `flush`; they are never
//!   returned from a mutation.

use crate::model::task::{TaskId, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod settings_store;
pub mod task_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Caller-facing errors from store mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(TaskValidationError),
    NotFound(TaskId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}
