//! Error type shared by every core operation.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoachError {
    /// A required field was empty. The operation left state untouched.
    #[error("missing required input: {field}")]
    InvalidInput { field: &'static str },
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    #[error("task not found: {task_id} (project {project_id})")]
    TaskNotFound { project_id: String, task_id: String },
    #[error("no user is signed in")]
    NotSignedIn,
    #[error("unknown view: {0}")]
    UnknownView(String),
    #[error("unknown priority: {0} (expected low, medium or high)")]
    UnknownPriority(String),
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
    #[error("unknown project kind: {0}")]
    UnknownProjectKind(String),
    /// The in-memory change stands; writing it out failed.
    #[error("could not persist {key}: {message}")]
    Persist { key: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, CoachError>;

/// Reject blank form input the way the submit handlers do.
pub(crate) fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let v = value.trim();
    if v.is_empty() {
        return Err(CoachError::InvalidInput { field });
    }
    Ok(v)
}
