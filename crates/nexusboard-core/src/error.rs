//! Core domain errors.

use thiserror::Error;

/// Core domain errors for NexusBoard.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Task not found.
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Project not found.
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// The acting role is not allowed to perform the action.
    #[error("Role '{role}' is not allowed to {action}")]
    PermissionDenied { role: String, action: String },

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
