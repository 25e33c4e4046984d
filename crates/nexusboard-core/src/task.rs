//! Task and checklist types.

use crate::{ChecklistItemId, Priority, ProjectId, Status, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single checklist entry on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Unique item identifier.
    pub id: ChecklistItemId,

    /// Item text; QA gate items are matched by exact text equality.
    pub text: String,

    /// Whether the item has been ticked off.
    pub checked: bool,

    /// Optional due date/time (ISO 8601), display-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl ChecklistItem {
    /// Create a new unchecked item with a fresh id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ChecklistItemId::generate(),
            text: text.into(),
            checked: false,
            due_date: None,
        }
    }

    /// Create a checked item with a fresh id.
    pub fn checked(text: impl Into<String>) -> Self {
        Self {
            checked: true,
            ..Self::new(text)
        }
    }
}

/// A colored label attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub text: String,
    /// Hex color for rendering, carried opaquely.
    pub color: String,
}

/// File attachment metadata. The file contents live with the storage
/// layer; the core only carries the descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    /// Broad content kind: "image", "pdf", "other".
    pub kind: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// A Task is a card on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,

    /// Project this task belongs to; ordering is scoped per
    /// (project, status) column.
    pub project_id: ProjectId,

    /// Card title.
    pub title: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Current column.
    pub status: Status,

    /// Priority level.
    #[serde(default)]
    pub priority: Priority,

    /// Completion percentage, 0-100.
    pub progress: u8,

    /// Labels.
    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Attachment descriptors.
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Checklist entries, in display order.
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,

    /// Username of the assigned member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Task due date (ISO 8601), display-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Creation time; RFC 3339 rendering is the ordering tie-break.
    pub created_at: DateTime<Utc>,

    /// Fractional sort position within the (project, status) column.
    /// Absent positions sort as 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

impl Task {
    /// Create a new task in the To Do column with no progress.
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            id: TaskId::generate(),
            project_id,
            title: title.into(),
            description: String::new(),
            status: Status::Todo,
            priority: Priority::Medium,
            progress: 0,
            tags: Vec::new(),
            attachments: Vec::new(),
            checklist: Vec::new(),
            assignee: None,
            due_date: None,
            created_at: Utc::now(),
            position: None,
        }
    }

    /// Builder method to set a specific ID (useful for testing).
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = id;
        self
    }

    /// Builder method to set the column.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Builder method to set the progress percentage.
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress;
        self
    }

    /// Builder method to set the sort position.
    pub fn with_position(mut self, position: f64) -> Self {
        self.position = Some(position);
        self
    }

    /// Builder method to replace the checklist.
    pub fn with_checklist(mut self, checklist: Vec<ChecklistItem>) -> Self {
        self.checklist = checklist;
        self
    }

    /// Sort position, treating a missing value as 0.
    pub fn position_or_zero(&self) -> f64 {
        self.position.unwrap_or(0.0)
    }

    /// Progress implied by the checklist: the rounded percentage of
    /// checked items, or 0 for an empty checklist. Callers that derive
    /// progress from the checklist feed this back into `progress`
    /// before running automation.
    pub fn checklist_progress(&self) -> u8 {
        let total = self.checklist.len();
        if total == 0 {
            return 0;
        }
        let checked = self.checklist.iter().filter(|i| i.checked).count();
        ((checked as f64 / total as f64) * 100.0).round() as u8
    }
}
