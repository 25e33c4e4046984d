//! HTTP request and response types.

use serde::{Deserialize, Serialize};

use nexusboard_core::{BoardStats, Side, Status, Task};

// ============================================================================
// Error types
// ============================================================================

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Project types
// ============================================================================

/// Request body for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    /// Display name.
    pub name: String,

    /// Username of the owner.
    pub owner: String,
}

/// Request body for sharing a project.
#[derive(Debug, Deserialize)]
pub struct ShareProjectRequest {
    /// Username to share with.
    pub username: String,
}

// ============================================================================
// Task types
// ============================================================================

/// Request body for quick-adding a task to a column.
#[derive(Debug, Deserialize)]
pub struct QuickAddRequest {
    /// Project to add the task to.
    pub project_id: String,

    /// Card title.
    pub title: String,

    /// Target column; defaults to `todo`.
    #[serde(default)]
    pub status: Status,
}

/// Request body for a drag-drop move.
#[derive(Debug, Deserialize)]
pub struct MoveTaskRequest {
    /// The column the card was dropped into.
    pub status: Status,

    /// Sibling the card was dropped next to, if any.
    #[serde(default)]
    pub anchor: Option<String>,

    /// Which side of the anchor; defaults to `after`.
    #[serde(default)]
    pub side: Option<Side>,
}

/// A task plus the automation rule that fired while storing it, if any.
/// The rule description is the client's toast payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct AutomatedTaskResponse {
    pub task: Task,
    pub rule: Option<String>,
}

/// One rendered column of the board.
#[derive(Debug, Serialize, Deserialize)]
pub struct ColumnResponse {
    /// Column identifier.
    pub status: Status,

    /// Column header label.
    pub label: String,

    /// Tasks in manual order.
    pub tasks: Vec<Task>,
}

/// Full board for a project: every column in board order.
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardResponse {
    pub columns: Vec<ColumnResponse>,
}

// ============================================================================
// Stats types
// ============================================================================

/// Board statistics plus the stagnation-risk task ids.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: BoardStats,
    pub stalled: Vec<String>,
}
