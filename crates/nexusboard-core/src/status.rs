//! Status, priority and role enums for the board.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Lifecycle column of a task on the board.
///
/// The variants are declared in column order; `Status::ALL` iterates
/// them left to right as the board renders them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Intake column; tasks parked here are never auto-promoted at 0%.
    Backlog,
    /// Not started.
    #[default]
    Todo,
    /// Actively being worked on.
    InProgress,
    /// Nearly finished, or held back by the QA gate.
    Review,
    /// Finished and QA-verified.
    Done,
}

impl Status {
    /// All columns in board order.
    pub const ALL: [Status; 5] = [
        Status::Backlog,
        Status::Todo,
        Status::InProgress,
        Status::Review,
        Status::Done,
    ];

    /// Display label for the column header.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Backlog => "Backlog",
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Review => "Review",
            Status::Done => "Done",
        }
    }

    /// Wire/storage identifier (lowercase, matches serde encoding).
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Backlog => "backlog",
            Status::Todo => "todo",
            Status::InProgress => "inprogress",
            Status::Review => "review",
            Status::Done => "done",
        }
    }

    /// Returns true for the terminal column.
    pub fn is_done(&self) -> bool {
        matches!(self, Status::Done)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backlog" => Ok(Status::Backlog),
            "todo" => Ok(Status::Todo),
            "inprogress" => Ok(Status::InProgress),
            "review" => Ok(Status::Review),
            "done" => Ok(Status::Done),
            other => Err(CoreError::InvalidInput(format!(
                "unknown status '{other}'"
            ))),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        f.write_str(s)
    }
}

/// Role of the acting user, as established by the (external) auth layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access including deletion.
    Admin,
    /// Can read, edit and move tasks.
    #[default]
    Editor,
    /// Read-only access.
    Viewer,
}

/// Actions a role may be allowed to perform on board content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Read,
    Edit,
    Move,
    Delete,
}

impl Role {
    /// Check whether this role is allowed to perform an action.
    pub fn allows(&self, permission: Permission) -> bool {
        match self {
            Role::Admin => true,
            Role::Editor => !matches!(permission, Permission::Delete),
            Role::Viewer => matches!(permission, Permission::Read),
        }
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            other => Err(CoreError::InvalidInput(format!("unknown role '{other}'"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in Status::ALL {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_column_order() {
        assert_eq!(Status::ALL[0], Status::Backlog);
        assert_eq!(Status::ALL[4], Status::Done);
    }

    #[test]
    fn test_editor_cannot_delete() {
        assert!(Role::Editor.allows(Permission::Move));
        assert!(!Role::Editor.allows(Permission::Delete));
        assert!(Role::Admin.allows(Permission::Delete));
    }

    #[test]
    fn test_viewer_is_read_only() {
        assert!(Role::Viewer.allows(Permission::Read));
        assert!(!Role::Viewer.allows(Permission::Edit));
        assert!(!Role::Viewer.allows(Permission::Move));
    }
}
